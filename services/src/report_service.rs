//! Read-side queries for teachers: per-day history, CSV export and the
//! student roster.

use chrono::{DateTime, Days, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use db::models::{
    attendance_record::{self, AttendanceStatus},
    session, student,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::authorization::AuthorizationPolicy;
use crate::error::{ServiceError, ServiceResult};
use crate::student_service::Student;

pub const CSV_HEADER: &str = "Name,Roll No,Status";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct HistoryRow {
    pub name: String,
    pub roll_no: String,
    pub status: AttendanceStatus,
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::Validation(format!("invalid date '{date}' (expected YYYY-MM-DD)")))
}

/// `[start, end)` of `date` in the server's local time zone, as UTC instants.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    day_bounds_in(&Local, date)
}

/// `[start, end)` of `date` in `tz`. `end` is the next local midnight, so every
/// instant up to and including 23:59:59.999 belongs to the day.
pub fn day_bounds_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    (local_midnight(tz, date), local_midnight(tz, next))
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // midnight skipped by a DST jump: the day starts at the first valid hour
        LocalResult::None => (1..=3)
            .find_map(|h| tz.from_local_datetime(&(naive + Duration::hours(h))).earliest())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

pub struct ReportService;

impl ReportService {
    /// Attendance rows of every `department` session that started on `date`
    /// (local time), ordered by session start then roll number. Records whose
    /// student has been deleted are left out.
    pub async fn history(
        db: &DatabaseConnection,
        policy: &AuthorizationPolicy,
        teacher_id: Option<&str>,
        department: &str,
        date: &str,
    ) -> ServiceResult<Vec<HistoryRow>> {
        policy.authorize(db, teacher_id).await?;

        let department = department.trim();
        if department.is_empty() {
            return Err(ServiceError::Validation("department is required".into()));
        }
        let (from, to) = day_bounds(parse_date(date)?);

        Self::history_between(db, department, from, to).await
    }

    /// Rows for sessions of `department` whose start lies in `[from, to)`.
    pub async fn history_between(
        db: &DatabaseConnection,
        department: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ServiceResult<Vec<HistoryRow>> {
        let rows = attendance_record::Entity::find()
            .select_only()
            .column_as(student::Column::Name, "name")
            .column_as(student::Column::RollNo, "roll_no")
            .column_as(attendance_record::Column::Status, "status")
            .join(JoinType::InnerJoin, attendance_record::Relation::Session.def())
            .join(JoinType::InnerJoin, attendance_record::Relation::Student.def())
            .filter(session::Column::Department.eq(department))
            .filter(session::Column::StartTime.gte(from))
            .filter(session::Column::StartTime.lt(to))
            .order_by_asc(session::Column::StartTime)
            .order_by_asc(student::Column::RollNo)
            .into_model::<HistoryRow>()
            .all(db)
            .await?;

        Ok(rows)
    }

    /// Same rows as [`history`](Self::history) rendered as CSV.
    pub async fn export_csv(
        db: &DatabaseConnection,
        policy: &AuthorizationPolicy,
        teacher_id: Option<&str>,
        department: &str,
        date: &str,
    ) -> ServiceResult<String> {
        let rows = Self::history(db, policy, teacher_id, department, date).await?;
        Ok(render_csv(&rows))
    }

    pub async fn list_students(
        db: &DatabaseConnection,
        policy: &AuthorizationPolicy,
        teacher_id: Option<&str>,
    ) -> ServiceResult<Vec<Student>> {
        policy.authorize(db, teacher_id).await?;
        Ok(student::Model::list_all(db).await?)
    }

    /// Removes the student. Their attendance records stay in the store.
    pub async fn delete_student(
        db: &DatabaseConnection,
        policy: &AuthorizationPolicy,
        teacher_id: Option<&str>,
        student_id: &str,
    ) -> ServiceResult<()> {
        let actor = policy.authorize(db, teacher_id).await?;

        if !student::Model::delete(db, student_id.trim()).await? {
            return Err(ServiceError::NotFound("student not found".into()));
        }

        tracing::info!(student_id = %student_id, deleted_by = ?actor.teacher_id(), "Student deleted");
        Ok(())
    }
}

/// Header line plus one line per row. Values are written as-is, without quoting.
pub fn render_csv(rows: &[HistoryRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!("{},{},{}\n", row.name, row.roll_no, row.status));
    }
    out
}
