use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::{
    report_service::{HistoryRow, ReportService},
    student_service::Student,
};
use validator::Validate;

use crate::auth::TeacherQuery;
use crate::routes::common::{error_response, ok, validation_response};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct HistoryQuery {
    pub teacher_id: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
}

/// GET /admin/history?teacher_id=&department=CS&date=2024-03-01
///
/// Attendance rows for the department's sessions that started on `date`
/// (server-local day), ordered by session start then roll number.
///
/// ### Responses
/// - `200 OK` with `data: [{ "name", "roll_no", "status" }, ...]`
/// - `400 Bad Request` for a missing department or a malformed date
/// - `403 Forbidden` when the authorization policy rejects `teacher_id`
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    if let Err(errors) = query.validate() {
        return validation_response::<Vec<HistoryRow>>(&errors);
    }

    match ReportService::history(
        state.db(),
        state.policy(),
        query.teacher_id.as_deref(),
        &query.department,
        &query.date,
    )
    .await
    {
        Ok(rows) => ok(rows, "History retrieved"),
        Err(e) => error_response(e),
    }
}

/// File name offered for an export of `department` on `date`. Anything outside
/// `[A-Za-z0-9_-]` becomes `_` so the value is always a valid quoted header.
pub fn export_filename(department: &str, date: &str) -> String {
    format!(
        "attendance_{}_{}.csv",
        filename_component(department.trim()),
        filename_component(date.trim())
    )
}

fn filename_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// GET /admin/export?teacher_id=&department=CS&date=2024-03-01
///
/// Same rows as `/admin/history`, as a `text/csv` attachment with the header
/// `Name,Roll No,Status`. Errors use the JSON envelope.
pub async fn export_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    if let Err(errors) = query.validate() {
        return validation_response::<()>(&errors).into_response();
    }

    match ReportService::export_csv(
        state.db(),
        state.policy(),
        query.teacher_id.as_deref(),
        &query.department,
        &query.date,
    )
    .await
    {
        Ok(csv) => (
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"{}\"",
                        export_filename(&query.department, &query.date)
                    ),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => error_response::<()>(e).into_response(),
    }
}

/// GET /admin/students?teacher_id=
///
/// ### Responses
/// - `200 OK` with every student, ordered by roll number
/// - `403 Forbidden` when the authorization policy rejects `teacher_id`
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<TeacherQuery>,
) -> impl IntoResponse {
    match ReportService::list_students(state.db(), state.policy(), query.teacher_id.as_deref()).await {
        Ok(students) => ok::<Vec<Student>>(students, "Students retrieved"),
        Err(e) => error_response(e),
    }
}
