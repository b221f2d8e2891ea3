use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One student's attendance outcome for one session.
///
/// Identity is the `(session_id, student_id)` pair and the store rejects a
/// second row for the same pair, so the first write always wins. There is no
/// foreign key to `students`: a deleted student's rows remain and drop out of
/// reports through inner joins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: String,

    pub status: AttendanceStatus,
    pub marked_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "PRESENT")]
    Present,

    #[sea_orm(string_value = "ABSENT")]
    Absent,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::session::Entity",
        from = "Column::SessionId",
        to = "super::session::Column::Id",
        on_delete = "Cascade"
    )]
    Session,

    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Rows per `INSERT` in [`Model::create_missing`]. Each row binds four
/// parameters and SQLite caps a statement at 32766.
pub const INSERT_BATCH_SIZE: usize = 500;

impl Model {
    /// Plain insert. A row that already exists for the pair surfaces as a
    /// unique violation (see [`crate::is_unique_violation`]).
    pub async fn create<C>(
        db: &C,
        session_id: &str,
        student_id: &str,
        status: AttendanceStatus,
        marked_at: DateTime<Utc>,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let record = ActiveModel {
            session_id: Set(session_id.to_owned()),
            student_id: Set(student_id.to_owned()),
            status: Set(status),
            marked_at: Set(marked_at),
        };

        record.insert(db).await
    }

    /// Inserts one row per student with `ON CONFLICT DO NOTHING`, so rows that
    /// already exist (or are committed concurrently) are left untouched.
    ///
    /// Large rosters are written in chunks of [`INSERT_BATCH_SIZE`]. Returns
    /// the number of rows actually written.
    pub async fn create_missing<C>(
        db: &C,
        session_id: &str,
        student_ids: &[String],
        status: AttendanceStatus,
        marked_at: DateTime<Utc>,
    ) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut written = 0;
        for chunk in student_ids.chunks(INSERT_BATCH_SIZE) {
            let rows = chunk.iter().map(|student_id| ActiveModel {
                session_id: Set(session_id.to_owned()),
                student_id: Set(student_id.clone()),
                status: Set(status),
                marked_at: Set(marked_at),
            });

            written += Entity::insert_many(rows)
                .on_conflict(
                    OnConflict::columns([Column::SessionId, Column::StudentId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(db)
                .await?;
        }

        Ok(written)
    }

    pub async fn find<C>(db: &C, session_id: &str, student_id: &str) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find_by_id((session_id.to_owned(), student_id.to_owned()))
            .one(db)
            .await
    }

    pub async fn for_session<C>(db: &C, session_id: &str) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .all(db)
            .await
    }
}
