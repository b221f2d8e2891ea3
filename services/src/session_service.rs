//! Session lifecycle: open, sweep (auto-close + absentee backfill), explicit close.
//!
//! ```text
//! ACTIVE --(sweep, end_time reached | explicit close)--> INACTIVE
//! ```
//!
//! There is no in-process lock. Both invariants are held by the store:
//! - the partial unique index on `sessions(department) WHERE status = 'ACTIVE'`
//!   keeps one active session per department;
//! - the `(session_id, student_id)` primary key on `attendance_records` lets a
//!   concurrent mark and backfill race safely (first commit wins).

use chrono::{DateTime, Duration, Utc};
use db::{
    is_unique_violation,
    models::{
        attendance_record::{self, AttendanceStatus},
        session, student,
    },
};
use sea_orm::DatabaseConnection;
use std::collections::HashSet;

use crate::authorization::AuthorizationPolicy;
use crate::error::{ServiceError, ServiceResult};

pub use db::models::session::{Model as Session, SessionStatus};

const ALREADY_ACTIVE: &str = "session already active";

/// Outcome of one sweep pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub sessions_closed: usize,
    pub absentees_recorded: u64,
    pub failures: usize,
}

/// Outcome of an explicit close request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed { absentees_recorded: u64 },
    AlreadyClosed,
}

pub struct SessionService;

impl SessionService {
    pub async fn start_session(
        db: &DatabaseConnection,
        policy: &AuthorizationPolicy,
        teacher_id: Option<&str>,
        department: &str,
        duration_minutes: i64,
    ) -> ServiceResult<Session> {
        Self::start_session_at(db, policy, teacher_id, department, duration_minutes, Utc::now()).await
    }

    /// Opens a session for `department` lasting `duration_minutes` from `now`.
    pub async fn start_session_at(
        db: &DatabaseConnection,
        policy: &AuthorizationPolicy,
        teacher_id: Option<&str>,
        department: &str,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<Session> {
        let department = department.trim();
        if department.is_empty() {
            return Err(ServiceError::Validation("department is required".into()));
        }
        if duration_minutes <= 0 {
            return Err(ServiceError::Validation(
                "duration_minutes must be greater than 0".into(),
            ));
        }
        let duration = Duration::try_minutes(duration_minutes)
            .ok_or_else(|| ServiceError::Validation("duration_minutes is too large".into()))?;
        let end_time = now
            .checked_add_signed(duration)
            .ok_or_else(|| ServiceError::Validation("duration_minutes is too large".into()))?;

        let actor = policy.authorize(db, teacher_id).await?;

        if session::Model::find_active_for_department(db, department)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(ALREADY_ACTIVE.into()));
        }

        // Two concurrent starts can both pass the check above; the partial
        // unique index rejects the loser.
        match session::Model::create(db, department, now, end_time, actor.teacher_id()).await {
            Ok(s) => {
                tracing::info!(
                    session_id = %s.id,
                    department = %s.department,
                    end_time = %s.end_time,
                    created_by = ?s.created_by,
                    "Attendance session started"
                );
                Ok(s)
            }
            Err(e) if is_unique_violation(&e) => Err(ServiceError::Conflict(ALREADY_ACTIVE.into())),
            Err(e) => Err(e.into()),
        }
    }

    /// The session currently accepting marks for `department`, if any.
    pub async fn active_for_department(
        db: &DatabaseConnection,
        department: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<Option<Session>> {
        let department = department.trim();
        if department.is_empty() {
            return Err(ServiceError::Validation("department is required".into()));
        }
        Ok(session::Model::find_open_for_department(db, department, now).await?)
    }

    pub async fn sweep(db: &DatabaseConnection) -> ServiceResult<SweepReport> {
        Self::sweep_at(db, Utc::now()).await
    }

    /// Closes every `ACTIVE` session whose window ended at or before `now`,
    /// backfilling ABSENT records first.
    ///
    /// A failure on one session is logged and counted; the remaining sessions
    /// are still processed. Only a failure to list the expired sessions is
    /// returned as an error.
    pub async fn sweep_at(db: &DatabaseConnection, now: DateTime<Utc>) -> ServiceResult<SweepReport> {
        let expired = session::Model::find_expired(db, now).await?;
        let mut report = SweepReport::default();

        for s in expired {
            match Self::backfill_and_close(db, &s, now).await {
                Ok(Some(written)) => {
                    report.sessions_closed += 1;
                    report.absentees_recorded += written;
                    tracing::info!(
                        session_id = %s.id,
                        department = %s.department,
                        absentees = written,
                        "Closed expired attendance session"
                    );
                }
                // closed by someone else in the meantime
                Ok(None) => {}
                Err(e) => {
                    report.failures += 1;
                    tracing::error!(
                        session_id = %s.id,
                        department = %s.department,
                        error = %e,
                        "Failed to close expired attendance session"
                    );
                }
            }
        }

        Ok(report)
    }

    /// Closes a session immediately, regardless of its `end_time`, with the
    /// same backfill the sweep performs. Closing an already closed session is
    /// a no-op.
    pub async fn close_session(
        db: &DatabaseConnection,
        policy: &AuthorizationPolicy,
        teacher_id: Option<&str>,
        session_id: &str,
    ) -> ServiceResult<CloseOutcome> {
        policy.authorize(db, teacher_id).await?;

        let s = session::Model::find_by_id(db, session_id.trim())
            .await?
            .ok_or_else(|| ServiceError::NotFound("session not found".into()))?;

        if !s.is_active() {
            return Ok(CloseOutcome::AlreadyClosed);
        }

        match Self::backfill_and_close(db, &s, Utc::now()).await? {
            Some(absentees_recorded) => {
                tracing::info!(session_id = %s.id, absentees = absentees_recorded, "Attendance session closed early");
                Ok(CloseOutcome::Closed { absentees_recorded })
            }
            None => Ok(CloseOutcome::AlreadyClosed),
        }
    }

    /// Inserts ABSENT for every student of the session's department that has no
    /// record yet, then flips the session to INACTIVE.
    ///
    /// Returns `Some(rows_written)` when this call closed the session and `None`
    /// when it was already INACTIVE by the time the status update ran. Running
    /// it again after a partial failure is safe: the insert skips existing
    /// pairs and the status update is guarded on `ACTIVE`.
    async fn backfill_and_close(
        db: &DatabaseConnection,
        s: &Session,
        now: DateTime<Utc>,
    ) -> ServiceResult<Option<u64>> {
        let recorded: HashSet<String> = attendance_record::Model::for_session(db, &s.id)
            .await?
            .into_iter()
            .map(|r| r.student_id)
            .collect();

        let missing: Vec<String> = student::Model::in_department(db, &s.department)
            .await?
            .into_iter()
            .map(|st| st.id)
            .filter(|id| !recorded.contains(id))
            .collect();

        let written = attendance_record::Model::create_missing(
            db,
            &s.id,
            &missing,
            AttendanceStatus::Absent,
            now,
        )
        .await?;

        if session::Model::mark_inactive(db, &s.id).await? {
            Ok(Some(written))
        } else {
            Ok(None)
        }
    }
}
