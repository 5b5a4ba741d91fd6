use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, conflict, current_requester};
use crate::utils::validate::{validate_name, validate_required_text, validate_semester};

fn normalize(req: &mut CreateSubjectRequest) -> Result<(), HttpResponse> {
    validate_name(&req.name).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    validate_required_text(&req.code, "Subject code")
        .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    if let Some(semester) = req.semester {
        validate_semester(semester).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }

    req.name = req.name.trim().to_string();
    req.code = req.code.trim().to_string();
    req.department = req
        .department
        .take()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    Ok(())
}

pub async fn create_subject(
    service: &SubjectService,
    mut subject_request: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Subject, Action::Write, None) {
        return Ok(e.to_response("create subject"));
    }

    if let Err(response) = normalize(&mut subject_request) {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    match storage.get_subject_by_code(&subject_request.code).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::SubjectCodeAlreadyExists,
                "Subject code already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(e.to_response("create subject")),
    }

    match storage.create_subject(subject_request).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject created successfully",
        ))),
        Err(e) if e.status() == actix_web::http::StatusCode::CONFLICT => Ok(conflict(
            ErrorCode::SubjectCodeAlreadyExists,
            "Subject code already exists",
        )),
        Err(e) => Ok(e.to_response("create subject")),
    }
}
