use super::SeaOrmStorage;
use crate::entity::grievances::{ActiveModel, Column, Entity as Grievances};
use crate::errors::{PortalError, Result};
use crate::models::grievances::{
    entities::{Grievance, GrievanceFilter, GrievanceStatus, TransitionOutcome},
    requests::CreateGrievanceRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 提交申诉，初始状态为 Open
    pub async fn create_grievance_impl(
        &self,
        user_id: i64,
        req: CreateGrievanceRequest,
    ) -> Result<Grievance> {
        let model = ActiveModel {
            user_id: Set(user_id),
            category: Set(req.category),
            description: Set(req.description),
            status: Set(GrievanceStatus::Open.to_string()),
            is_anonymous: Set(req.is_anonymous),
            created_at: Set(chrono::Utc::now().timestamp()),
            resolved_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("提交申诉失败: {e}")))?;

        Ok(result.into_grievance())
    }

    /// 通过 ID 获取申诉
    pub async fn get_grievance_by_id_impl(&self, id: i64) -> Result<Option<Grievance>> {
        let result = Grievances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询申诉失败: {e}")))?;

        Ok(result.map(|m| m.into_grievance()))
    }

    /// 列出申诉，最新的在前
    pub async fn list_grievances_impl(&self, filter: GrievanceFilter) -> Result<Vec<Grievance>> {
        let mut select = Grievances::find();

        if let Some(user_id) = filter.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }

        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let grievances = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询申诉列表失败: {e}")))?;

        Ok(grievances.into_iter().map(|m| m.into_grievance()).collect())
    }

    /// 迁移申诉状态
    ///
    /// `UPDATE ... WHERE id = ? AND status IN (前驱状态)`，并发的迁移只有一个能成功。
    /// 迁移到 Resolved 时写入解决时间。
    pub async fn transition_grievance_impl(
        &self,
        id: i64,
        next: GrievanceStatus,
    ) -> Result<TransitionOutcome> {
        let predecessors: Vec<String> = GrievanceStatus::predecessors_of(next)
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let rows_affected = if predecessors.is_empty() {
            0
        } else {
            let mut update = Grievances::update_many()
                .col_expr(Column::Status, Expr::value(next.to_string()))
                .filter(Column::Id.eq(id))
                .filter(Column::Status.is_in(predecessors));

            if next == GrievanceStatus::Resolved {
                update = update.col_expr(
                    Column::ResolvedAt,
                    Expr::value(chrono::Utc::now().timestamp()),
                );
            }

            update
                .exec(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("更新申诉状态失败: {e}")))?
                .rows_affected
        };

        match self.get_grievance_by_id_impl(id).await? {
            None => Ok(TransitionOutcome::NotFound),
            Some(grievance) if rows_affected > 0 => Ok(TransitionOutcome::Updated(grievance)),
            Some(grievance) => Ok(TransitionOutcome::Rejected {
                current: grievance.status,
            }),
        }
    }

    /// 删除申诉
    pub async fn delete_grievance_impl(&self, id: i64) -> Result<bool> {
        let result = Grievances::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除申诉失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
