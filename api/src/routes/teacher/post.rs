use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use services::{ServiceError, teacher_service::TeacherService};

use crate::response::ApiResponse;
use crate::routes::common::{error_response, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub teacher_id: String,
}

/// POST /teacher/login
///
/// Checks the credentials with the configured verifier. No token is issued;
/// the returned id is what the gated routes accept as `teacher_id`.
///
/// ### Responses
/// - `200 OK` with `data: { "teacher_id": "..." }`
/// - `401 Unauthorized` for an unknown username or wrong password
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> impl IntoResponse {
    match TeacherService::login(state.db(), state.verifier(), &req.username, &req.password).await {
        Ok(teacher) => ok(
            LoginResponse {
                teacher_id: teacher.id,
            },
            "Login successful",
        ),
        Err(ServiceError::Unauthorized(msg)) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<LoginResponse>::error(msg)),
        ),
        Err(e) => error_response(e),
    }
}
