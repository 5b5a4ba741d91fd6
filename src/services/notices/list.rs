use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NoticeService, notice_views};
use crate::config::AppConfig;
use crate::models::{ApiResponse, notices::requests::NoticeListQuery};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::current_requester;

pub async fn list_notices(
    service: &NoticeService,
    query: NoticeListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Notice, Action::Read, None) {
        return Ok(e.to_response("fetch notices"));
    }

    let limit = AppConfig::get().portal.notice_limit(query.limit);
    let storage = service.get_storage(request);

    let notices = match storage.list_notices(query.category, limit).await {
        Ok(notices) => notices,
        Err(e) => return Ok(e.to_response("fetch notices")),
    };

    match notice_views(&storage, notices).await {
        Ok(views) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            views,
            "Notices retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("fetch notices")),
    }
}
