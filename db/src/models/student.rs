use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

/// A registered student. Students are immutable once created; the only
/// mutation is deletion, which leaves their attendance records in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub roll_no: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
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
    pub async fn create(
        db: &DbConn,
        name: &str,
        roll_no: &str,
        department: &str,
    ) -> Result<Model, DbErr> {
        let student = ActiveModel {
            id: Set(crate::new_id()),
            name: Set(name.to_owned()),
            roll_no: Set(roll_no.to_owned()),
            department: Set(department.to_owned()),
            created_at: Set(Utc::now()),
        };

        student.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub async fn find_by_roll_no(db: &DbConn, roll_no: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RollNo.eq(roll_no))
            .one(db)
            .await
    }

    /// Every student currently registered in `department`.
    pub async fn in_department<C>(db: &C, department: &str) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::Department.eq(department))
            .all(db)
            .await
    }

    pub async fn list_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::RollNo)
            .all(db)
            .await
    }

    /// Deletes the student row only. Returns `false` if no such student existed.
    pub async fn delete(db: &DbConn, id: &str) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id.to_owned()).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
