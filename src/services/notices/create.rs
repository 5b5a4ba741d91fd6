use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode, notices::requests::CreateNoticeRequest};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, current_requester};
use crate::utils::validate::validate_required_text;

pub async fn create_notice(
    service: &NoticeService,
    mut notice_request: CreateNoticeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Notice, Action::Write, None) {
        return Ok(e.to_response("create notice"));
    }

    if let Err(msg) = validate_required_text(&notice_request.title, "Title")
        .and_then(|_| validate_required_text(&notice_request.content, "Content"))
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    notice_request.title = notice_request.title.trim().to_string();

    let storage = service.get_storage(request);
    match storage.create_notice(notice_request, requester.id).await {
        Ok(notice) => {
            tracing::info!("Notice {} published by {}", notice.id, requester.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                notice,
                "Notice created successfully",
            )))
        }
        Err(e) => Ok(e.to_response("create notice")),
    }
}
