use super::SeaOrmStorage;
use crate::entity::marks::{ActiveModel, Column, Entity as Marks};
use crate::errors::{PortalError, Result};
use crate::models::marks::entities::{MarkEntry, NewMark};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_mark_impl(&self, mark: NewMark) -> Result<MarkEntry> {
        let model = ActiveModel {
            student_id: Set(mark.student_id),
            subject_id: Set(mark.subject_id),
            exam_type: Set(mark.exam_type),
            marks: Set(mark.marks),
            max_marks: Set(mark.max_marks),
            semester: Set(mark.semester),
            entered_by: Set(Some(mark.entered_by)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("录入成绩失败: {e}")))?;

        Ok(result.into_mark_entry())
    }

    /// 通过 ID 获取成绩
    pub async fn get_mark_by_id_impl(&self, id: i64) -> Result<Option<MarkEntry>> {
        let result = Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_mark_entry()))
    }

    /// 修改分数
    pub async fn update_mark_value_impl(&self, id: i64, marks: i32) -> Result<Option<MarkEntry>> {
        let result = Marks::update_many()
            .col_expr(Column::Marks, Expr::value(marks))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("修改成绩失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_mark_by_id_impl(id).await
    }

    /// 列出学生成绩
    pub async fn list_marks_impl(
        &self,
        student_id: i64,
        semester: Option<i32>,
    ) -> Result<Vec<MarkEntry>> {
        let mut select = Marks::find().filter(Column::StudentId.eq(student_id));

        if let Some(semester) = semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        let marks = select
            .order_by_asc(Column::SubjectId)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(marks.into_iter().map(|m| m.into_mark_entry()).collect())
    }
}
