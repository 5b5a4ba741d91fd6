pub mod attendance;
pub mod detail;
pub mod list;
pub mod marks;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{PortalError, Result};
use crate::models::attendance::requests::{AttendanceQuery, MarkAttendanceRequest};
use crate::models::marks::requests::MarksQuery;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 学生名册
    pub async fn list_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_students(self, request).await
    }

    // 学生详情
    pub async fn get_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_student(self, student_id, request).await
    }

    // 学生考勤
    pub async fn get_attendance(
        &self,
        student_id: i64,
        query: AttendanceQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::get_attendance(self, student_id, query, request).await
    }

    // 登记考勤
    pub async fn mark_attendance(
        &self,
        mark_request: MarkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::mark_attendance(self, mark_request, request).await
    }

    // 学生成绩
    pub async fn get_marks(
        &self,
        student_id: i64,
        query: MarksQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        marks::get_marks(self, student_id, query, request).await
    }
}

/// 按 ID 加载学生账号；不存在、已停用或不是学生时返回 NotFound
pub(crate) async fn load_student(storage: &Arc<dyn Storage>, student_id: i64) -> Result<User> {
    match storage.get_user_by_id(student_id).await? {
        Some(user) if user.role == UserRole::Student && user.is_active => Ok(user),
        _ => Err(PortalError::not_found("Student not found")),
    }
}
