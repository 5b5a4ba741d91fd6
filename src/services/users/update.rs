use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester, not_found};
use crate::utils::validate::{validate_name, validate_semester};

fn validate_update(update: &mut UpdateUserRequest) -> Result<(), HttpResponse> {
    if update.is_empty() {
        return Err(bad_request(ErrorCode::ValidationFailed, "No fields to update"));
    }
    if let Some(name) = update.name.as_mut() {
        validate_name(name).map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
        *name = name.trim().to_string();
    }
    if let Some(semester) = update.semester {
        validate_semester(semester).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    Ok(())
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) =
        AccessPolicy::check(&requester, Resource::Profile, Action::Write, Some(user_id))
    {
        return Ok(e.to_response("update user"));
    }

    if let Err(response) = validate_update(&mut update_data) {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "User information updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(e.to_response("update user")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_rejected() {
        let mut update = UpdateUserRequest::default();
        assert!(validate_update(&mut update).is_err());
    }

    #[test]
    fn test_name_trimmed() {
        let mut update = UpdateUserRequest {
            name: Some("  Meera Iyer ".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&mut update).is_ok());
        assert_eq!(update.name.as_deref(), Some("Meera Iyer"));
    }

    #[test]
    fn test_semester_range_checked() {
        let mut update = UpdateUserRequest {
            semester: Some(13),
            ..Default::default()
        };
        assert!(validate_update(&mut update).is_err());
    }
}
