pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::timetable::{
    entities::TimetableSlot, requests::TimetableQuery, responses::TimetableSlotView,
};
use crate::storage::Storage;

pub struct TimetableService {
    storage: Option<Arc<dyn Storage>>,
}

impl TimetableService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 课表查询
    pub async fn list_timetable(
        &self,
        query: TimetableQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_timetable(self, query, request).await
    }
}

/// 为时段补充课程与教师名称，保持输入顺序
pub(crate) async fn slot_views(
    storage: &Arc<dyn Storage>,
    slots: Vec<TimetableSlot>,
) -> Result<Vec<TimetableSlotView>> {
    let subject_ids: Vec<i64> = slots.iter().map(|s| s.subject_id).collect();
    let teacher_ids: Vec<i64> = slots.iter().map(|s| s.teacher_id).collect();
    let subjects = storage.get_subjects_by_ids(&subject_ids).await?;
    let teachers = storage.get_users_by_ids(&teacher_ids).await?;

    Ok(slots
        .into_iter()
        .map(|slot| {
            let subject = subjects.get(&slot.subject_id);
            TimetableSlotView {
                subject: subject.map(|s| s.name.clone()),
                subject_code: subject.map(|s| s.code.clone()),
                teacher_name: teachers.get(&slot.teacher_id).map(|t| t.name.clone()),
                slot,
            }
        })
        .collect())
}
