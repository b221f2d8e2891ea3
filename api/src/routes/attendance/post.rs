use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use services::attendance_service::AttendanceService;
use validator::Validate;

use crate::routes::common::{MessageResponse, error_response, ok, validation_response};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "student_id is required"))]
    pub student_id: String,
}

/// POST /attendance/mark
///
/// Marks the student PRESENT in the open session of their department.
///
/// ### Request Body
/// ```json
/// { "student_id": "..." }
/// ```
///
/// ### Responses
/// - `200 OK` with `data: { "message": "Attendance marked" }`
/// - `400 Bad Request` when the student is unknown, no session is open for
///   the department, or the student already has a record for the session
pub async fn mark(
    State(state): State<AppState>,
    Json(req): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    if let Err(errors) = req.validate() {
        return validation_response::<MessageResponse>(&errors);
    }

    match AttendanceService::mark(state.db(), &req.student_id).await {
        Ok(_) => ok(MessageResponse::new("Attendance marked"), "Attendance marked"),
        Err(e) => error_response(e),
    }
}
