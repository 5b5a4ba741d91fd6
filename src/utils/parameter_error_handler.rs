//! 请求体与查询参数解析失败时的统一响应

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload error on {}: {}", req.path(), err);

    let (response, message) = match &err {
        JsonPayloadError::ContentType => (
            HttpResponse::UnsupportedMediaType(),
            "Content-Type must be application/json".to_string(),
        ),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => (
            HttpResponse::PayloadTooLarge(),
            "Request body is too large".to_string(),
        ),
        JsonPayloadError::Deserialize(e) => {
            (HttpResponse::BadRequest(), format!("Invalid request body: {e}"))
        }
        _ => (HttpResponse::BadRequest(), format!("Invalid request body: {err}")),
    };

    let mut builder = response;
    let body = builder.json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, body).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query parameter error on {}: {}", req.path(), err);

    let body = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, body).into()
}
