pub mod attendance_service;
pub mod authorization;
pub mod credentials;
pub mod error;
pub mod report_service;
pub mod session_service;
pub mod student_service;
pub mod sweeper;
pub mod teacher_service;

pub use error::{ServiceError, ServiceResult};
