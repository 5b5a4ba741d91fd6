use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode, notices::requests::UpdateNoticeRequest};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester, not_found};
use crate::utils::validate::validate_required_text;

fn validate_update(update: &UpdateNoticeRequest) -> Result<(), String> {
    if update.title.is_none()
        && update.content.is_none()
        && update.category.is_none()
        && update.is_pinned.is_none()
    {
        return Err("No fields to update".to_string());
    }
    if let Some(title) = &update.title {
        validate_required_text(title, "Title")?;
    }
    if let Some(content) = &update.content {
        validate_required_text(content, "Content")?;
    }
    Ok(())
}

pub async fn update_notice(
    service: &NoticeService,
    notice_id: i64,
    update_request: UpdateNoticeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Notice, Action::Write, None) {
        return Ok(e.to_response("update notice"));
    }

    if let Err(msg) = validate_update(&update_request) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let storage = service.get_storage(request);
    match storage.update_notice(notice_id, update_request).await {
        Ok(Some(notice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notice,
            "Notice updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(e.to_response("update notice")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_requires_a_field() {
        assert!(validate_update(&UpdateNoticeRequest::default()).is_err());
        let pin = UpdateNoticeRequest {
            is_pinned: Some(true),
            ..Default::default()
        };
        assert!(validate_update(&pin).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let update = UpdateNoticeRequest {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&update).is_err());
    }
}
