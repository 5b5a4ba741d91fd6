//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub exam_type: String,
    pub marks: i32,
    pub max_marks: i32,
    pub semester: Option<i32>,
    pub entered_by: Option<i64>,
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
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mark_entry(self) -> crate::models::marks::entities::MarkEntry {
        use chrono::{DateTime, Utc};

        crate::models::marks::entities::MarkEntry {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            exam_type: self.exam_type,
            marks: self.marks,
            max_marks: self.max_marks,
            semester: self.semester,
            entered_by: self.entered_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
