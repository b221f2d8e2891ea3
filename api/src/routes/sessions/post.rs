use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use services::session_service::{CloseOutcome, SessionService};
use validator::Validate;

use crate::routes::common::{MessageResponse, error_response, ok, validation_response};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct StartSessionRequest {
    pub teacher_id: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,

    #[validate(
        required(message = "duration_minutes is required"),
        range(min = 1, message = "duration_minutes must be greater than 0")
    )]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct StartSessionResponse {
    pub session_id: String,
}

/// POST /sessions/start
///
/// ### Request Body
/// ```json
/// { "teacher_id": "...", "department": "CS", "duration_minutes": 10 }
/// ```
///
/// ### Responses
/// - `200 OK` with `data: { "session_id": "..." }`
/// - `400 Bad Request` for missing fields, or when the department already has
///   an active session
/// - `403 Forbidden` when the authorization policy rejects `teacher_id`
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    if let Err(errors) = req.validate() {
        return validation_response::<StartSessionResponse>(&errors);
    }
    let duration_minutes = req.duration_minutes.unwrap_or_default();

    match SessionService::start_session(
        state.db(),
        state.policy(),
        req.teacher_id.as_deref(),
        &req.department,
        duration_minutes,
    )
    .await
    {
        Ok(session) => ok(
            StartSessionResponse {
                session_id: session.id,
            },
            "Session started",
        ),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CloseSessionRequest {
    pub teacher_id: Option<String>,
}

/// POST /sessions/{session_id}/close
///
/// Ends the session now and backfills ABSENT for every student of the
/// department without a record. Closing a closed session succeeds.
///
/// ### Responses
/// - `200 OK` with `data: { "message": "..." }`
/// - `403 Forbidden` when the authorization policy rejects `teacher_id`
/// - `404 Not Found` for an unknown session
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<CloseSessionRequest>,
) -> impl IntoResponse {
    match SessionService::close_session(state.db(), state.policy(), req.teacher_id.as_deref(), &session_id)
        .await
    {
        Ok(CloseOutcome::Closed { absentees_recorded }) => {
            let message = format!("Session closed; {absentees_recorded} absentee(s) recorded");
            ok(MessageResponse::new(message.clone()), message)
        }
        Ok(CloseOutcome::AlreadyClosed) => ok(
            MessageResponse::new("Session already closed"),
            "Session already closed",
        ),
        Err(e) => error_response(e),
    }
}
