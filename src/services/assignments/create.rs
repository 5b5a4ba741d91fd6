use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::config::AppConfig;
use crate::models::assignments::{entities::NewAssignment, requests::CreateAssignmentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester, not_found};
use crate::utils::validate::{parse_date, validate_required_text};

/// 校验并补全默认值
fn prepare(
    req: CreateAssignmentRequest,
    default_max_marks: i32,
    created_by: i64,
) -> Result<NewAssignment, String> {
    validate_required_text(&req.title, "Title")?;

    let deadline = match req.deadline.as_deref().map(str::trim) {
        Some("") | None => None,
        Some(value) => Some(parse_date(value)?),
    };

    let max_marks = req.max_marks.unwrap_or(default_max_marks);
    if max_marks <= 0 {
        return Err("Maximum marks must be greater than zero".to_string());
    }

    Ok(NewAssignment {
        title: req.title.trim().to_string(),
        subject_id: req.subject_id,
        description: req.description.filter(|d| !d.trim().is_empty()),
        deadline,
        max_marks,
        created_by,
    })
}

pub async fn create_assignment(
    service: &AssignmentService,
    assignment_request: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Assignment, Action::Write, None) {
        return Ok(e.to_response("create assignment"));
    }

    let default_max_marks = AppConfig::get().portal.default_assignment_max_marks;
    let new_assignment = match prepare(assignment_request, default_max_marks, requester.id) {
        Ok(assignment) => assignment,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };

    let storage = service.get_storage(request);
    match storage.get_subject_by_id(new_assignment.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(e.to_response("create assignment")),
    }

    match storage.create_assignment(new_assignment).await {
        Ok(assignment) => Ok(HttpResponse::Created().json(ApiResponse::success(
            assignment,
            "Assignment created successfully",
        ))),
        Err(e) => Ok(e.to_response("create assignment")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(deadline: Option<&str>, max_marks: Option<i32>) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: " Lab 3 ".to_string(),
            subject_id: 1,
            description: Some(String::new()),
            deadline: deadline.map(str::to_string),
            max_marks,
        }
    }

    #[test]
    fn test_defaults_applied() {
        let new = prepare(request(None, None), 100, 9).unwrap();
        assert_eq!(new.title, "Lab 3");
        assert_eq!(new.max_marks, 100);
        assert!(new.deadline.is_none());
        assert!(new.description.is_none());
        assert_eq!(new.created_by, 9);
    }

    #[test]
    fn test_deadline_parsed() {
        let new = prepare(request(Some("2026-03-15"), Some(20)), 100, 9).unwrap();
        assert_eq!(
            new.deadline,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 15)
        );
        assert_eq!(new.max_marks, 20);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(prepare(request(Some("15/03/2026"), None), 100, 9).is_err());
        assert!(prepare(request(None, Some(0)), 100, 9).is_err());
    }
}
