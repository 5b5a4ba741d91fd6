//! 申诉实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grievances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    pub is_anonymous: bool,
    pub created_at: i64,
    pub resolved_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grievance(self) -> crate::models::grievances::entities::Grievance {
        use crate::models::grievances::entities::{Grievance, GrievanceStatus};
        use chrono::{DateTime, Utc};

        Grievance {
            id: self.id,
            user_id: self.user_id,
            category: self.category,
            description: self.description,
            status: self
                .status
                .parse::<GrievanceStatus>()
                .unwrap_or(GrievanceStatus::Open),
            is_anonymous: self.is_anonymous,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            resolved_at: self
                .resolved_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
