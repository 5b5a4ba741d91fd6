use super::SeaOrmStorage;
use crate::entity::notices::{ActiveModel, Column, Entity as Notices};
use crate::errors::{PortalError, Result};
use crate::models::notices::{
    entities::{Notice, NoticeCategory},
    requests::{CreateNoticeRequest, UpdateNoticeRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 发布公告
    pub async fn create_notice_impl(
        &self,
        req: CreateNoticeRequest,
        created_by: i64,
    ) -> Result<Notice> {
        let model = ActiveModel {
            title: Set(req.title),
            content: Set(req.content),
            category: Set(req.category.to_string()),
            is_pinned: Set(req.is_pinned),
            created_by: Set(Some(created_by)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("发布公告失败: {e}")))?;

        Ok(result.into_notice())
    }

    /// 通过 ID 获取公告
    pub async fn get_notice_by_id_impl(&self, id: i64) -> Result<Option<Notice>> {
        let result = Notices::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(result.map(|m| m.into_notice()))
    }

    /// 列出公告：置顶优先，其次按发布时间倒序
    pub async fn list_notices_impl(
        &self,
        category: Option<NoticeCategory>,
        limit: u64,
    ) -> Result<Vec<Notice>> {
        let mut select = Notices::find();

        if let Some(category) = category {
            select = select.filter(Column::Category.eq(category.to_string()));
        }

        let notices = select
            .order_by_desc(Column::IsPinned)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询公告列表失败: {e}")))?;

        Ok(notices.into_iter().map(|m| m.into_notice()).collect())
    }

    /// 更新公告
    pub async fn update_notice_impl(
        &self,
        id: i64,
        update: UpdateNoticeRequest,
    ) -> Result<Option<Notice>> {
        if self.get_notice_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        let mut changed = false;

        if let Some(title) = update.title {
            model.title = Set(title);
            changed = true;
        }

        if let Some(content) = update.content {
            model.content = Set(content);
            changed = true;
        }

        if let Some(category) = update.category {
            model.category = Set(category.to_string());
            changed = true;
        }

        if let Some(is_pinned) = update.is_pinned {
            model.is_pinned = Set(is_pinned);
            changed = true;
        }

        if changed {
            model
                .update(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("更新公告失败: {e}")))?;
        }

        self.get_notice_by_id_impl(id).await
    }

    /// 删除公告
    pub async fn delete_notice_impl(&self, id: i64) -> Result<bool> {
        let result = Notices::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
