use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NoticeService, notice_views};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{current_requester, not_found};

pub async fn get_notice(
    service: &NoticeService,
    notice_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Notice, Action::Read, None) {
        return Ok(e.to_response("get notice"));
    }

    let storage = service.get_storage(request);
    let notice = match storage.get_notice_by_id(notice_id).await {
        Ok(Some(notice)) => notice,
        Ok(None) => return Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => return Ok(e.to_response("get notice")),
    };

    match notice_views(&storage, vec![notice]).await {
        Ok(mut views) => match views.pop() {
            Some(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                view,
                "Notice retrieved successfully",
            ))),
            None => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        },
        Err(e) => Ok(e.to_response("get notice")),
    }
}
