use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::current_requester;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Subject, Action::Read, None) {
        return Ok(e.to_response("list subjects"));
    }

    let storage = service.get_storage(request);
    match storage.list_subjects().await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            subjects,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("list subjects")),
    }
}
