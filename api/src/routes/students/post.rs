use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use services::student_service::StudentService;
use validator::Validate;

use crate::routes::common::{error_response, ok, validation_response};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "roll_no is required"))]
    pub roll_no: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
}

#[derive(Debug, Serialize, Default)]
pub struct RegisterStudentResponse {
    pub student_id: String,
}

/// POST /students/register
///
/// ### Request Body
/// ```json
/// { "name": "Ada", "roll_no": "R1", "department": "CS" }
/// ```
///
/// ### Responses
/// - `200 OK` with `data: { "student_id": "..." }`
/// - `400 Bad Request` for missing fields or an already registered `roll_no`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterStudentRequest>,
) -> impl IntoResponse {
    if let Err(errors) = req.validate() {
        return validation_response::<RegisterStudentResponse>(&errors);
    }

    match StudentService::register(state.db(), &req.name, &req.roll_no, &req.department).await {
        Ok(student) => ok(
            RegisterStudentResponse {
                student_id: student.id,
            },
            "Student registered successfully",
        ),
        Err(e) => error_response(e),
    }
}
