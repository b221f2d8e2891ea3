use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use services::report_service::ReportService;

use crate::auth::TeacherQuery;
use crate::routes::common::{MessageResponse, error_response, ok};
use crate::state::AppState;

/// DELETE /admin/students/{student_id}?teacher_id=
///
/// Removes the student. Their attendance records are kept but no longer show
/// up in history or exports.
///
/// ### Responses
/// - `200 OK` with `data: { "message": "Student deleted" }`
/// - `403 Forbidden` when the authorization policy rejects `teacher_id`
/// - `404 Not Found` for an unknown student
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Query(query): Query<TeacherQuery>,
) -> impl IntoResponse {
    match ReportService::delete_student(state.db(), state.policy(), query.teacher_id.as_deref(), &student_id)
        .await
    {
        Ok(()) => ok(MessageResponse::new("Student deleted"), "Student deleted"),
        Err(e) => error_response(e),
    }
}
