use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A department-scoped, time-boxed attendance window.
///
/// At most one session per department may be `ACTIVE` at any instant; the
/// store enforces this with a partial unique index, so a second insert for the
/// same department fails with a unique violation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub department: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: SessionStatus,
    pub created_by: Option<String>,
}

/// `ACTIVE -> INACTIVE` is the only transition; `INACTIVE` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SessionStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,

    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        department: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        created_by: Option<&str>,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let session = ActiveModel {
            id: Set(crate::new_id()),
            department: Set(department.to_owned()),
            start_time: Set(start_time),
            end_time: Set(end_time),
            status: Set(SessionStatus::Active),
            created_by: Set(created_by.map(|s| s.to_owned())),
        };

        session.insert(db).await
    }

    pub async fn find_by_id<C>(db: &C, id: &str) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    /// The `ACTIVE` session for `department`, whether or not its window has
    /// already elapsed.
    pub async fn find_active_for_department<C>(
        db: &C,
        department: &str,
    ) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::Department.eq(department))
            .filter(Column::Status.eq(SessionStatus::Active))
            .one(db)
            .await
    }

    /// The `ACTIVE` session for `department` whose window is still open at `now`.
    pub async fn find_open_for_department<C>(
        db: &C,
        department: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::Department.eq(department))
            .filter(Column::Status.eq(SessionStatus::Active))
            .filter(Column::EndTime.gt(now))
            .one(db)
            .await
    }

    /// `ACTIVE` sessions whose `end_time` is at or before `now`, oldest first.
    pub async fn find_expired<C>(db: &C, now: DateTime<Utc>) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::Status.eq(SessionStatus::Active))
            .filter(Column::EndTime.lte(now))
            .order_by_asc(Column::EndTime)
            .all(db)
            .await
    }

    /// Flips the session to `INACTIVE`. The update is guarded on the current
    /// status, so it returns `false` (and writes nothing) when the session was
    /// already closed or does not exist.
    pub async fn mark_inactive<C>(db: &C, id: &str) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::update_many()
            .col_expr(Column::Status, Expr::value(SessionStatus::Inactive))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(SessionStatus::Active))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}
