use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{current_requester, not_found};

pub async fn delete_notice(
    service: &NoticeService,
    notice_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Notice, Action::Write, None) {
        return Ok(e.to_response("delete notice"));
    }

    let storage = service.get_storage(request);
    match storage.delete_notice(notice_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Notice deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(e.to_response("delete notice")),
    }
}
