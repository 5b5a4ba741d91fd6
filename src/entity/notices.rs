//! 公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub is_pinned: bool,
    pub created_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notice(self) -> crate::models::notices::entities::Notice {
        use crate::models::notices::entities::{Notice, NoticeCategory};
        use chrono::{DateTime, Utc};

        Notice {
            id: self.id,
            title: self.title,
            content: self.content,
            category: self
                .category
                .parse::<NoticeCategory>()
                .unwrap_or(NoticeCategory::General),
            is_pinned: self.is_pinned,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
