use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester, not_found};

/// 停用账号；账号从不物理删除，历史记录保持可追溯
pub async fn deactivate_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) =
        AccessPolicy::check(&requester, Resource::AccountDirectory, Action::Write, None)
    {
        return Ok(e.to_response("deactivate user"));
    }

    if requester.id == user_id {
        return Ok(bad_request(
            ErrorCode::CannotDeactivateSelf,
            "You cannot deactivate your own account",
        ));
    }

    let storage = service.get_storage(request);
    match storage.deactivate_user(user_id).await {
        Ok(true) => {
            tracing::info!("User {} deactivated by {}", user_id, requester.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "User deactivated successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(e.to_response("deactivate user")),
    }
}
