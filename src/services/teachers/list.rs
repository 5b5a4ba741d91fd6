use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::models::users::{entities::UserRole, requests::UserListQuery};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::current_requester;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::TeacherDirectory, Action::Read, None)
    {
        return Ok(e.to_response("list teachers"));
    }

    let storage = service.get_storage(request);
    let query = UserListQuery {
        role: Some(UserRole::Teacher),
        active_only: Some(true),
    };

    match storage.list_users(query).await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            teachers,
            "Teacher list retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("list teachers")),
    }
}
