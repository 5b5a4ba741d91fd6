use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::timetable::{entities::NewTimetableSlot, requests::CreateTimetableRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester, not_found};
use crate::utils::validate::validate_time_range;

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn create_slot(
    service: &TeacherService,
    slot_request: CreateTimetableRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Timetable, Action::Write, None) {
        return Ok(e.to_response("create timetable slot"));
    }

    if let Err(msg) = validate_time_range(&slot_request.start_time, &slot_request.end_time) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let storage = service.get_storage(request);
    match storage.get_subject_by_id(slot_request.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(e.to_response("create timetable slot")),
    }

    // 时段归属于发起请求的教师
    let slot = NewTimetableSlot {
        subject_id: slot_request.subject_id,
        teacher_id: requester.id,
        day: slot_request.day,
        start_time: slot_request.start_time,
        end_time: slot_request.end_time,
        room: trimmed(slot_request.room),
        batch: trimmed(slot_request.batch),
    };

    match storage.create_timetable_slot(slot).await {
        Ok(slot) => Ok(HttpResponse::Created().json(ApiResponse::success(
            slot,
            "Timetable slot created successfully",
        ))),
        Err(e) => Ok(e.to_response("create timetable slot")),
    }
}
