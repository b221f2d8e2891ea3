use db::{is_unique_violation, models::student};
use sea_orm::DatabaseConnection;

use crate::error::{ServiceError, ServiceResult};

pub use db::models::student::Model as Student;

const DUPLICATE_ROLL_NO: &str = "roll_no already registered";

pub struct StudentService;

impl StudentService {
    /// Registers a student. All three fields are trimmed and required; the
    /// roll number must be unique across the whole store.
    pub async fn register(
        db: &DatabaseConnection,
        name: &str,
        roll_no: &str,
        department: &str,
    ) -> ServiceResult<Student> {
        let (name, roll_no, department) = (name.trim(), roll_no.trim(), department.trim());
        if name.is_empty() || roll_no.is_empty() || department.is_empty() {
            return Err(ServiceError::Validation(
                "name, roll_no and department are required".into(),
            ));
        }

        if student::Model::find_by_roll_no(db, roll_no).await?.is_some() {
            return Err(ServiceError::Conflict(DUPLICATE_ROLL_NO.into()));
        }

        // The pre-check can race another registration; the UNIQUE column settles it.
        match student::Model::create(db, name, roll_no, department).await {
            Ok(s) => {
                tracing::info!(student_id = %s.id, roll_no = %s.roll_no, department = %s.department, "Student registered");
                Ok(s)
            }
            Err(e) if is_unique_violation(&e) => Err(ServiceError::Conflict(DUPLICATE_ROLL_NO.into())),
            Err(e) => Err(e.into()),
        }
    }
}
