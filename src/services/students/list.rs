use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::users::{entities::UserRole, requests::UserListQuery};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::current_requester;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::StudentDirectory, Action::Read, None)
    {
        return Ok(e.to_response("list students"));
    }

    let storage = service.get_storage(request);
    let query = UserListQuery {
        role: Some(UserRole::Student),
        active_only: Some(true),
    };

    match storage.list_users(query).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            students,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("list students")),
    }
}
