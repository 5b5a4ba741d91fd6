//! 学习资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "study_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub unit_title: String,
    pub resource_name: String,
    pub resource_type: String,
    pub resource_url: Option<String>,
    pub uploaded_by: Option<i64>,
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
    pub fn into_material(self) -> crate::models::materials::entities::StudyMaterial {
        use crate::models::materials::entities::{ResourceType, StudyMaterial};
        use chrono::{DateTime, Utc};

        StudyMaterial {
            id: self.id,
            subject_id: self.subject_id,
            unit_title: self.unit_title,
            resource_name: self.resource_name,
            resource_type: self
                .resource_type
                .parse::<ResourceType>()
                .unwrap_or(ResourceType::Link),
            resource_url: self.resource_url,
            uploaded_by: self.uploaded_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
