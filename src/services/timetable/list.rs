use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TimetableService, slot_views};
use crate::models::ApiResponse;
use crate::models::timetable::{entities::TimetableFilter, requests::TimetableQuery};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::current_requester;

pub async fn list_timetable(
    service: &TimetableService,
    query: TimetableQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Timetable, Action::Read, None) {
        return Ok(e.to_response("fetch timetable"));
    }

    let storage = service.get_storage(request);
    let filter = TimetableFilter {
        teacher_id: query.teacher_id,
        batch: query.batch.filter(|b| !b.trim().is_empty()),
    };

    let slots = match storage.list_timetable(filter).await {
        Ok(slots) => slots,
        Err(e) => return Ok(e.to_response("fetch timetable")),
    };

    match slot_views(&storage, slots).await {
        Ok(views) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            views,
            "Timetable retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("fetch timetable")),
    }
}
