use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::TeacherService;
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::timetable::{entities::TimetableFilter, responses::TeacherDetailResponse};
use crate::models::users::entities::UserRole;
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::current_requester;
use crate::services::timetable::slot_views;
use crate::storage::Storage;

async fn build_detail(storage: &Arc<dyn Storage>, teacher_id: i64) -> Result<TeacherDetailResponse> {
    let teacher = match storage.get_user_by_id(teacher_id).await? {
        Some(user) if user.role == UserRole::Teacher => user,
        _ => return Err(PortalError::not_found("Teacher not found")),
    };

    let subjects = storage.list_subjects_taught_by(teacher_id).await?;
    let slots = storage
        .list_timetable(TimetableFilter {
            teacher_id: Some(teacher_id),
            batch: None,
        })
        .await?;
    let timetable = slot_views(storage, slots).await?;

    Ok(TeacherDetailResponse {
        teacher,
        subjects,
        timetable,
    })
}

pub async fn get_teacher(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::TeacherDirectory,
        Action::Read,
        Some(teacher_id),
    ) {
        return Ok(e.to_response("get teacher"));
    }

    let storage = service.get_storage(request);
    match build_detail(&storage, teacher_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Teacher details retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("get teacher")),
    }
}
