//! Helpers shared by the route handlers.

use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::ServiceError;
use util::validation::format_validation_errors;
use validator::ValidationErrors;

use crate::response::ApiResponse;

pub type HandlerResponse<T> = (StatusCode, Json<ApiResponse<T>>);

/// `data` payload for endpoints that only report an outcome.
#[derive(Debug, Default, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_)
        | ServiceError::Conflict(_)
        | ServiceError::AlreadyMarked
        | ServiceError::NotActive => StatusCode::BAD_REQUEST,
        ServiceError::Unauthorized(_) => StatusCode::FORBIDDEN,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Internal(_) | ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a service error onto the envelope. Server-side errors are logged and
/// reported without their details.
pub fn error_response<T>(err: ServiceError) -> HandlerResponse<T>
where
    T: Serialize + Default,
{
    let status = status_for(&err);
    let message = match &err {
        ServiceError::Database(e) => {
            tracing::error!(error = %e, "Database error");
            "Internal server error".to_owned()
        }
        ServiceError::Internal(e) => {
            tracing::error!(error = %e, "Internal error");
            "Internal server error".to_owned()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

pub fn validation_response<T>(errors: &ValidationErrors) -> HandlerResponse<T>
where
    T: Serialize + Default,
{
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(format_validation_errors(errors))),
    )
}

pub fn ok<T>(data: T, message: impl Into<String>) -> HandlerResponse<T>
where
    T: Serialize,
{
    (StatusCode::OK, Json(ApiResponse::success(data, message)))
}
