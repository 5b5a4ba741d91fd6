use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::HealthResponse;
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(start) = request.app_data::<web::Data<AppStartTime>>() else {
        return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Start time not registered",
        )));
    };

    let now = chrono::Utc::now();
    let response = HealthResponse {
        status: "ok".to_string(),
        environment: service.get_config().app.environment.clone(),
        started_at: start.start_datetime,
        uptime_seconds: (now - start.start_datetime).num_seconds(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is running")))
}
