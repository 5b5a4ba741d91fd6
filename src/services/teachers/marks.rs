use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::TeacherService;
use crate::errors::{PortalError, Result};
use crate::models::marks::{
    entities::{MarkEntry, NewMark},
    requests::{CreateMarkRequest, UpdateMarkRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::students::load_student;
use crate::services::{bad_request, current_requester, not_found};
use crate::storage::Storage;
use crate::utils::validate::{validate_marks, validate_required_text, validate_semester};

fn validate_new_mark(req: &CreateMarkRequest) -> std::result::Result<(), HttpResponse> {
    validate_required_text(&req.exam_type, "Exam type")
        .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    validate_marks(req.marks, req.max_marks)
        .map_err(|msg| bad_request(ErrorCode::MarksOutOfRange, msg))?;
    if let Some(semester) = req.semester {
        validate_semester(semester).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    Ok(())
}

async fn insert_mark(
    storage: &Arc<dyn Storage>,
    req: CreateMarkRequest,
    entered_by: i64,
) -> Result<MarkEntry> {
    load_student(storage, req.student_id).await?;
    if storage.get_subject_by_id(req.subject_id).await?.is_none() {
        return Err(PortalError::not_found("Subject not found"));
    }

    storage
        .create_mark(NewMark {
            student_id: req.student_id,
            subject_id: req.subject_id,
            exam_type: req.exam_type.trim().to_string(),
            marks: req.marks,
            max_marks: req.max_marks,
            semester: req.semester,
            entered_by,
        })
        .await
}

pub async fn create_mark(
    service: &TeacherService,
    mark_request: CreateMarkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::Marks,
        Action::Write,
        Some(mark_request.student_id),
    ) {
        return Ok(e.to_response("create mark"));
    }

    if let Err(response) = validate_new_mark(&mark_request) {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    match insert_mark(&storage, mark_request, requester.id).await {
        Ok(entry) => Ok(HttpResponse::Created().json(ApiResponse::success(
            entry,
            "Marks uploaded successfully",
        ))),
        Err(e) => Ok(e.to_response("create mark")),
    }
}

pub async fn update_mark(
    service: &TeacherService,
    mark_id: i64,
    update_request: UpdateMarkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let entry = match storage.get_mark_by_id(mark_id).await {
        Ok(Some(entry)) => entry,
        Ok(None) => return Ok(not_found(ErrorCode::MarkNotFound, "Mark entry not found")),
        Err(e) => return Ok(e.to_response("update mark")),
    };

    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::Marks,
        Action::Write,
        Some(entry.student_id),
    ) {
        return Ok(e.to_response("update mark"));
    }

    // 满分以已录入的为准
    if let Err(msg) = validate_marks(update_request.marks, entry.max_marks) {
        return Ok(bad_request(ErrorCode::MarksOutOfRange, msg));
    }

    match storage.update_mark_value(mark_id, update_request.marks).await {
        Ok(Some(entry)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entry,
            "Marks updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::MarkNotFound, "Mark entry not found")),
        Err(e) => Ok(e.to_response("update mark")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(marks: i32, max_marks: i32) -> CreateMarkRequest {
        CreateMarkRequest {
            student_id: 3,
            subject_id: 1,
            exam_type: "Mid-Term".to_string(),
            marks,
            max_marks,
            semester: Some(4),
        }
    }

    #[test]
    fn test_marks_bounds() {
        assert!(validate_new_mark(&request(0, 50)).is_ok());
        assert!(validate_new_mark(&request(50, 50)).is_ok());
        assert!(validate_new_mark(&request(51, 50)).is_err());
        assert!(validate_new_mark(&request(-1, 50)).is_err());
        assert!(validate_new_mark(&request(0, 0)).is_err());
    }

    #[test]
    fn test_blank_exam_type_rejected() {
        let mut req = request(10, 20);
        req.exam_type = "   ".to_string();
        assert!(validate_new_mark(&req).is_err());
    }
}
