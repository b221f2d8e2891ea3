use chrono::{DateTime, Utc};
use db::{
    is_unique_violation,
    models::{
        attendance_record::{self, AttendanceStatus},
        session, student,
    },
};
use sea_orm::DatabaseConnection;

use crate::error::{ServiceError, ServiceResult};

pub use db::models::attendance_record::Model as AttendanceRecord;

pub struct AttendanceService;

impl AttendanceService {
    pub async fn mark(db: &DatabaseConnection, student_id: &str) -> ServiceResult<AttendanceRecord> {
        Self::mark_at(db, student_id, Utc::now()).await
    }

    /// Records the student as PRESENT in their department's open session.
    ///
    /// Rejected when the student is unknown, when no session of the department
    /// is open at `now`, or when the student already has a record for that
    /// session (a PRESENT from an earlier mark or an ABSENT from the backfill).
    pub async fn mark_at(
        db: &DatabaseConnection,
        student_id: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<AttendanceRecord> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(ServiceError::Validation("student_id is required".into()));
        }

        let student = student::Model::find_by_id(db, student_id)
            .await?
            .ok_or_else(|| ServiceError::Validation("invalid student".into()))?;

        let session = session::Model::find_open_for_department(db, &student.department, now)
            .await?
            .ok_or(ServiceError::NotActive)?;

        // No read-before-write: the (session_id, student_id) key decides
        // between two concurrent marks and between a mark and the backfill.
        match attendance_record::Model::create(
            db,
            &session.id,
            &student.id,
            AttendanceStatus::Present,
            now,
        )
        .await
        {
            Ok(record) => {
                tracing::info!(
                    session_id = %session.id,
                    student_id = %student.id,
                    department = %student.department,
                    "Attendance marked"
                );
                Ok(record)
            }
            Err(e) if is_unique_violation(&e) => Err(ServiceError::AlreadyMarked),
            Err(e) => Err(e.into()),
        }
    }
}
