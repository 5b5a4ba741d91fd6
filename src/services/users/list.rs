use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, users::requests::UserListQuery};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::current_requester;

pub async fn list_users(
    service: &UserService,
    query: UserListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::AccountDirectory, Action::Read, None)
    {
        return Ok(e.to_response("list users"));
    }

    let storage = service.get_storage(request);
    match storage.list_users(query).await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            users,
            "User list retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("list users")),
    }
}
