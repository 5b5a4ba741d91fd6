use std::collections::HashMap;

use super::{SeaOrmStorage, dedup_ids, map_insert_err};
use crate::entity::prelude::{Assignments, Attendance, Marks, StudyMaterials, Timetable};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::{assignments, attendance, marks, study_materials, timetable};
use crate::errors::{PortalError, Result};
use crate::models::{
    DeleteOutcome,
    subjects::{entities::Subject, requests::CreateSubjectRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            department: Set(req.department),
            semester: Set(req.semester),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err(e, "Subject code already exists", "创建课程失败"))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取课程
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 通过课程代码获取课程
    pub async fn get_subject_by_code_impl(&self, code: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 批量获取课程
    pub async fn get_subjects_by_ids_impl(&self, ids: &[i64]) -> Result<HashMap<i64, Subject>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let subjects = Subjects::find()
            .filter(Column::Id.is_in(dedup_ids(ids)))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("批量查询课程失败: {e}")))?;

        Ok(subjects
            .into_iter()
            .map(|m| (m.id, m.into_subject()))
            .collect())
    }

    /// 列出全部课程，按学期与代码排序
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 教师在课表中承担的课程
    pub async fn list_subjects_taught_by_impl(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        let subject_ids: Vec<i64> = Timetable::find()
            .select_only()
            .column(timetable::Column::SubjectId)
            .filter(timetable::Column::TeacherId.eq(teacher_id))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师课程失败: {e}")))?;

        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        let subjects = Subjects::find()
            .filter(Column::Id.is_in(subject_ids))
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师课程失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 删除课程
    ///
    /// 被考勤、成绩、作业、资料或课表引用的课程不可删除。
    /// 引用检查与删除在同一事务中完成。
    pub async fn delete_subject_impl(&self, id: i64) -> Result<DeleteOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开始事务失败: {e}")))?;

        let exists = Subjects::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(DeleteOutcome::NotFound);
        }

        let references = [
            Attendance::find()
                .filter(attendance::Column::SubjectId.eq(id))
                .count(&txn)
                .await,
            Marks::find()
                .filter(marks::Column::SubjectId.eq(id))
                .count(&txn)
                .await,
            Assignments::find()
                .filter(assignments::Column::SubjectId.eq(id))
                .count(&txn)
                .await,
            StudyMaterials::find()
                .filter(study_materials::Column::SubjectId.eq(id))
                .count(&txn)
                .await,
            Timetable::find()
                .filter(timetable::Column::SubjectId.eq(id))
                .count(&txn)
                .await,
        ];

        let mut total = 0u64;
        for count in references {
            total += count.map_err(|e| {
                PortalError::database_operation(format!("统计课程引用失败: {e}"))
            })?;
        }
        if total > 0 {
            return Ok(DeleteOutcome::InUse);
        }

        Subjects::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(DeleteOutcome::Deleted)
    }
}
