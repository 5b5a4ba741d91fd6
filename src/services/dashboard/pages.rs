use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::services::current_requester;

use super::pages_for;

pub async fn list_pages(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success_list(
        pages_for(requester.role),
        "Dashboard pages retrieved successfully",
    )))
}
