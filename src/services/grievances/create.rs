use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GrievanceService, grievance_response};
use crate::models::{ApiResponse, ErrorCode, grievances::requests::CreateGrievanceRequest};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester};
use crate::utils::validate::validate_required_text;

pub async fn create_grievance(
    service: &GrievanceService,
    mut grievance_request: CreateGrievanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::Grievance,
        Action::Write,
        Some(requester.id),
    ) {
        return Ok(e.to_response("submit grievance"));
    }

    if let Err(msg) = validate_required_text(&grievance_request.category, "Category")
        .and_then(|_| validate_required_text(&grievance_request.description, "Description"))
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    grievance_request.category = grievance_request.category.trim().to_string();

    let storage = service.get_storage(request);
    let grievance = match storage
        .create_grievance(requester.id, grievance_request)
        .await
    {
        Ok(grievance) => grievance,
        Err(e) => return Ok(e.to_response("submit grievance")),
    };

    match grievance_response(&storage, grievance).await {
        Ok(response) => Ok(HttpResponse::Created().json(ApiResponse::success(
            response,
            "Grievance submitted successfully",
        ))),
        Err(e) => Ok(e.to_response("submit grievance")),
    }
}
