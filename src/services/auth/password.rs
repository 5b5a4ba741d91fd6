use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::ChangePasswordRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::AuthService;

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 1. 校验当前密码
    if !verify_password(&change_request.current_password, &current_user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        )));
    }

    // 2. 新密码策略
    if let Err(msg) = validate_password_simple(&change_request.new_password) {
        return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
    }
    if change_request.new_password == change_request.current_password {
        return Ok(bad_request(
            ErrorCode::PasswordPolicyViolation,
            "New password must differ from the current password",
        ));
    }

    let password_hash = match hash_password(&change_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to change password, please try again later",
                )),
            );
        }
    };

    // 3. 写入
    match storage
        .update_user_password(current_user.id, &password_hash)
        .await
    {
        Ok(true) => {
            tracing::info!("User {} changed password", current_user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Password changed successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(e.to_response("change password")),
    }
}
