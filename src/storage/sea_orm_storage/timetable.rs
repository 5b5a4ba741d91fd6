use super::SeaOrmStorage;
use crate::entity::timetable::{ActiveModel, Column, Entity as Timetable};
use crate::errors::{PortalError, Result};
use crate::models::timetable::entities::{
    NewTimetableSlot, TimetableFilter, TimetableSlot, sort_slots,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 新增课表时段
    pub async fn create_timetable_slot_impl(&self, slot: NewTimetableSlot) -> Result<TimetableSlot> {
        let model = ActiveModel {
            subject_id: Set(slot.subject_id),
            teacher_id: Set(slot.teacher_id),
            day: Set(slot.day.to_string()),
            start_time: Set(slot.start_time),
            end_time: Set(slot.end_time),
            room: Set(slot.room),
            batch: Set(slot.batch),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("新增课表失败: {e}")))?;

        Ok(result.into_slot())
    }

    /// 查询课表
    ///
    /// 星期以文本存储，无法在 SQL 中按周内顺序排序，取出后在内存中排序。
    pub async fn list_timetable_impl(&self, filter: TimetableFilter) -> Result<Vec<TimetableSlot>> {
        let mut select = Timetable::find();

        if let Some(teacher_id) = filter.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(batch) = filter.batch {
            select = select.filter(Column::Batch.eq(batch));
        }

        let slots = select
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课表失败: {e}")))?;

        let mut slots: Vec<TimetableSlot> = slots.into_iter().map(|m| m.into_slot()).collect();
        sort_slots(&mut slots);

        Ok(slots)
    }
}
