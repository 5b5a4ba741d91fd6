use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{conflict, current_requester, not_found};

pub async fn delete_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Subject, Action::Write, None) {
        return Ok(e.to_response("delete subject"));
    }

    let storage = service.get_storage(request);
    match storage.delete_subject(subject_id).await {
        Ok(DeleteOutcome::Deleted) => {
            tracing::info!("Subject {} deleted by {}", subject_id, requester.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Subject deleted successfully",
            )))
        }
        Ok(DeleteOutcome::NotFound) => {
            Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found"))
        }
        Ok(DeleteOutcome::InUse) => Ok(conflict(
            ErrorCode::SubjectInUse,
            "Subject is referenced by existing records and cannot be deleted",
        )),
        Err(e) => Ok(e.to_response("delete subject")),
    }
}
