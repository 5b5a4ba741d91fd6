use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GrievanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{current_requester, not_found};

pub async fn delete_grievance(
    service: &GrievanceService,
    grievance_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) =
        AccessPolicy::check(&requester, Resource::GrievanceResolution, Action::Write, None)
    {
        return Ok(e.to_response("delete grievance"));
    }

    let storage = service.get_storage(request);
    match storage.delete_grievance(grievance_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Grievance deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::GrievanceNotFound, "Grievance not found")),
        Err(e) => Ok(e.to_response("delete grievance")),
    }
}
