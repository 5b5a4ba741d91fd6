/*!
 * 速率限制中间件
 *
 * 对登录、注册、刷新令牌等公开端点按客户端 IP 做固定窗口计数，
 * 超出限制时返回 429 与 `Retry-After` 头。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

const WINDOW_SECS: u64 = 60;

/// 全局计数器，所有 worker 共享
/// 键: 前缀:IP，条目在窗口结束后过期
static COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    /// 每个窗口内允许的请求数
    max_requests: u32,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(max_requests: u32, key_prefix: &'static str) -> Self {
        Self {
            max_requests,
            key_prefix,
        }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, "login")
    }

    /// 注册：3 次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, "register")
    }

    /// 刷新令牌：10 次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, "refresh")
    }
}

/// 客户端 IP；优先使用连接信息，其次是反向代理头
fn client_ip(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let candidates = [
        info.realip_remote_addr().map(str::to_string),
        req.headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string()),
        req.headers()
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string()),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|ip| ip.parse::<IpAddr>().is_ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests() -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", WINDOW_SECS.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = format!("{}:{}", limit.key_prefix, client_ip(&req));
            let count = COUNTERS.get(&key).await.unwrap_or(0);

            if count >= limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, count, limit.max_requests
                );
                return Ok(req.into_response(too_many_requests().map_into_right_body()));
            }

            COUNTERS.insert(key, count + 1).await;

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(RateLimit::login().max_requests, 5);
        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::refresh_token().key_prefix, "refresh");
    }

    #[test]
    fn test_rejection_is_429_with_retry_after() {
        let resp = too_many_requests();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            resp.headers().get("Retry-After").and_then(|v| v.to_str().ok()),
            Some("60")
        );
    }
}
