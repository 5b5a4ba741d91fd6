use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{PortalError, Result};
use crate::models::attendance::entities::{AttendanceFilter, AttendanceRecord, NewAttendance};
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::OnConflict,
};

impl SeaOrmStorage {
    /// 记录考勤
    ///
    /// 单条 `INSERT ... ON CONFLICT (student_id, subject_id, date) DO UPDATE`，
    /// 依赖唯一索引保证并发写入后每个键只有一行。
    pub async fn upsert_attendance_impl(&self, record: NewAttendance) -> Result<AttendanceRecord> {
        let date = record.date.format("%Y-%m-%d").to_string();

        let model = ActiveModel {
            student_id: Set(record.student_id),
            subject_id: Set(record.subject_id),
            date: Set(date.clone()),
            status: Set(record.status.to_string()),
            marked_by: Set(Some(record.marked_by)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Attendance::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::SubjectId, Column::Date])
                    .update_columns([Column::Status, Column::MarkedBy])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("记录考勤失败: {e}")))?;

        let stored = Attendance::find()
            .filter(Column::StudentId.eq(record.student_id))
            .filter(Column::SubjectId.eq(record.subject_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询考勤失败: {e}")))?
            .ok_or_else(|| PortalError::database_operation("考勤写入后未找到记录"))?;

        Ok(stored.into_attendance())
    }

    /// 列出学生的考勤，按日期倒序
    pub async fn list_attendance_impl(
        &self,
        student_id: i64,
        filter: AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find().filter(Column::StudentId.eq(student_id));

        if let Some(subject_id) = filter.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        // 月份形如 YYYY-MM，日期以文本存储，按前缀匹配
        if let Some(month) = filter.month {
            select = select.filter(Column::Date.starts_with(format!("{month}-")));
        }

        let records = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }
}
