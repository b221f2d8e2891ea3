use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use services::session_service::{Session, SessionService};

use crate::routes::common::{error_response, ok};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActiveSessionQuery {
    #[serde(default)]
    pub department: String,
}

/// GET /sessions/active?department=CS
///
/// The session currently accepting marks for the department, or `null`.
///
/// ### Responses
/// - `200 OK` with the session (or `null`) as `data`
/// - `400 Bad Request` when `department` is missing
pub async fn get_active_session(
    State(state): State<AppState>,
    Query(query): Query<ActiveSessionQuery>,
) -> impl IntoResponse {
    match SessionService::active_for_department(state.db(), &query.department, Utc::now()).await {
        Ok(Some(session)) => ok::<Option<Session>>(Some(session), "Active session found"),
        Ok(None) => ok(None, "No active session"),
        Err(e) => error_response(e),
    }
}

