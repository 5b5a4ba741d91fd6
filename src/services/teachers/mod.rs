pub mod detail;
pub mod list;
pub mod marks;
pub mod timetable;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::marks::requests::{CreateMarkRequest, UpdateMarkRequest};
use crate::models::timetable::requests::CreateTimetableRequest;
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // 教师名册
    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request).await
    }

    // 教师详情
    pub async fn get_teacher(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_teacher(self, teacher_id, request).await
    }

    // 录入成绩
    pub async fn create_mark(
        &self,
        mark_request: CreateMarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        marks::create_mark(self, mark_request, request).await
    }

    // 修改成绩
    pub async fn update_mark(
        &self,
        mark_id: i64,
        update_request: UpdateMarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        marks::update_mark(self, mark_id, update_request, request).await
    }

    // 添加课表时段
    pub async fn create_timetable_slot(
        &self,
        slot_request: CreateTimetableRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        timetable::create_slot(self, slot_request, request).await
    }
}
