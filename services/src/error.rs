use sea_orm::DbErr;
use thiserror::Error;

/// Error taxonomy shared by every service. The HTTP layer maps each variant to
/// a status code; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule was violated (duplicate roll number, department
    /// already has an active session, ...).
    #[error("{0}")]
    Conflict(String),

    /// The student already has a record for the current session. A prior
    /// PRESENT and a prior ABSENT (backfilled by the sweep) are reported the same way.
    #[error("attendance already marked for this session")]
    AlreadyMarked,

    /// No open session exists for the student's department.
    #[error("no active attendance session for this department")]
    NotActive,

    /// Unknown teacher identity or bad credential.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Server-side failure outside the store, such as password hashing.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
