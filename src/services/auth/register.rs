use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::services::{bad_request, conflict};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_email, validate_email, validate_enrollment_no, validate_name,
    validate_password_simple, validate_semester,
};

use super::AuthService;

/// 注册请求的字段校验
fn validate_registration(req: &CreateUserRequest) -> Result<(), HttpResponse> {
    if !req.role.is_self_registrable() {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RoleNotAllowed,
            format!("Role {} cannot be self-registered", req.role),
        )));
    }

    validate_name(&req.name).map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
    validate_email(&req.email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    validate_password_simple(&req.password)
        .map_err(|msg| bad_request(ErrorCode::PasswordPolicyViolation, msg))?;

    if let Some(enrollment_no) = &req.enrollment_no {
        validate_enrollment_no(enrollment_no)
            .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    if let Some(semester) = req.semester {
        validate_semester(semester).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    Ok(())
}

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    create_request.name = create_request.name.trim().to_string();
    create_request.email = normalize_email(&create_request.email);

    // 1. 字段校验
    if let Err(response) = validate_registration(&create_request) {
        return Ok(response);
    }

    // 2. 检查邮箱是否已存在
    match storage.get_user_by_email(&create_request.email).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(e.to_response("register")),
    }

    // 3. 哈希密码，替换明文
    create_request.password = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed, please try again later",
                )),
            );
        }
    };

    // 4. 创建用户；并发注册同一邮箱时由唯一索引兜底
    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("Registered user {} with role {}", user.id, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        Err(e) if e.status() == actix_web::http::StatusCode::CONFLICT => Ok(conflict(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        )),
        Err(e) => Ok(e.to_response("register")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn request(role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            name: "Ravi Kumar".to_string(),
            email: "ravi@campus.edu".to_string(),
            password: "Campus2026".to_string(),
            role,
            department: Some("CSE".to_string()),
            semester: Some(3),
            enrollment_no: Some("CS2024-001".to_string()),
        }
    }

    #[test]
    fn test_management_registration_refused() {
        let resp = validate_registration(&request(UserRole::Management)).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_weak_password_refused() {
        let mut req = request(UserRole::Student);
        req.password = "short".to_string();
        let resp = validate_registration(&req).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_valid_student_passes() {
        assert!(validate_registration(&request(UserRole::Student)).is_ok());
        assert!(validate_registration(&request(UserRole::Parent)).is_ok());
    }
}
