/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，并从存储中加载账号。
 * 账号不存在或已停用时拒绝请求，因此停用立即生效，无需等待 token 过期。
 *
 * ```rust,ignore
 * web::scope("/api/v1/notices")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_notices))
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user(&req)` 取得当前账号。
 */

use crate::middlewares::create_error_response;
use crate::models::users::entities::{User, UserRole};
use crate::models::ErrorCode;
use crate::services::access::Requester;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败的原因
enum AuthRejection {
    Unauthorized(&'static str),
    Inactive,
    StoreUnavailable,
}

impl AuthRejection {
    fn into_response(self) -> actix_web::HttpResponse {
        match self {
            AuthRejection::Unauthorized(msg) => create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                msg,
            ),
            AuthRejection::Inactive => create_error_response(
                StatusCode::FORBIDDEN,
                ErrorCode::AccountInactive,
                "Account has been deactivated",
            ),
            AuthRejection::StoreUnavailable => create_error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::StoreUnavailable,
                "Service temporarily unavailable, please try again later",
            ),
        }
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<User, AuthRejection> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthRejection::Unauthorized(
            "Missing or invalid Authorization header",
        ))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthRejection::Unauthorized("Invalid or expired token")
    })?;

    let user_id = claims
        .user_id()
        .ok_or(AuthRejection::Unauthorized("Invalid token subject"))?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            AuthRejection::StoreUnavailable
        })?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {} during authentication: {}", user_id, e);
            AuthRejection::StoreUnavailable
        })?
        .ok_or(AuthRejection::Unauthorized("Account not found"))?;

    if !user.is_active {
        return Err(AuthRejection::Inactive);
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(rejection) => {
                    info!("JWT authentication failed for request to {}", req.path());
                    Ok(req.into_response(rejection.into_response().map_into_right_body()))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前账号；只能在应用了 RequireJWT 的路由中使用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }

    /// 访问控制使用的请求者身份
    pub fn extract_requester(req: &actix_web::HttpRequest) -> Option<Requester> {
        req.extensions().get::<User>().map(|user| Requester {
            id: user.id,
            role: user.role,
        })
    }
}
