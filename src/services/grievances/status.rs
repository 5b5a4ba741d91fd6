use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GrievanceService, grievance_response};
use crate::models::grievances::{
    entities::TransitionOutcome, requests::UpdateGrievanceStatusRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{conflict, current_requester, not_found};

pub async fn update_status(
    service: &GrievanceService,
    grievance_id: i64,
    status_request: UpdateGrievanceStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) =
        AccessPolicy::check(&requester, Resource::GrievanceResolution, Action::Write, None)
    {
        return Ok(e.to_response("update grievance"));
    }

    let next = status_request.status;
    let storage = service.get_storage(request);
    let grievance = match storage.transition_grievance(grievance_id, next).await {
        Ok(TransitionOutcome::Updated(grievance)) => grievance,
        Ok(TransitionOutcome::Rejected { current }) => {
            return Ok(conflict(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot change grievance status from {current} to {next}"),
            ));
        }
        Ok(TransitionOutcome::NotFound) => {
            return Ok(not_found(ErrorCode::GrievanceNotFound, "Grievance not found"));
        }
        Err(e) => return Ok(e.to_response("update grievance")),
    };

    tracing::info!(
        "Grievance {} moved to {} by {}",
        grievance_id,
        next,
        requester.id
    );

    match grievance_response(&storage, grievance).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grievance status updated successfully",
        ))),
        Err(e) => Ok(e.to_response("update grievance")),
    }
}
