use super::SeaOrmStorage;
use crate::entity::study_materials::{ActiveModel, Column, Entity as StudyMaterials};
use crate::errors::{PortalError, Result};
use crate::models::materials::{entities::StudyMaterial, requests::CreateMaterialRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 上传学习资料
    pub async fn create_material_impl(
        &self,
        subject_id: i64,
        uploaded_by: i64,
        req: CreateMaterialRequest,
    ) -> Result<StudyMaterial> {
        let model = ActiveModel {
            subject_id: Set(subject_id),
            unit_title: Set(req.unit_title),
            resource_name: Set(req.resource_name),
            resource_type: Set(req.resource_type.to_string()),
            resource_url: Set(req.resource_url),
            uploaded_by: Set(Some(uploaded_by)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("上传资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 列出课程资料，按单元与上传顺序排列
    pub async fn list_materials_impl(&self, subject_id: i64) -> Result<Vec<StudyMaterial>> {
        let materials = StudyMaterials::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::UnitTitle)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }
}
