//! 课表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timetable")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub batch: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_slot(self) -> crate::models::timetable::entities::TimetableSlot {
        use crate::models::timetable::entities::{TimetableSlot, Weekday};
        use chrono::{DateTime, Utc};

        TimetableSlot {
            id: self.id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            day: self.day.parse::<Weekday>().unwrap_or(Weekday::Sunday),
            start_time: self.start_time,
            end_time: self.end_time,
            room: self.room,
            batch: self.batch,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
