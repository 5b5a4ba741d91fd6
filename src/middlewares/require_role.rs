/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用，按账号角色做粗粒度的路由准入。
 * 涉及资源归属（本人记录、本人申诉）的判断在服务层通过 `AccessPolicy` 完成。
 *
 * ```rust,ignore
 * web::scope("")
 *     .wrap(RequireRole::new_any(UserRole::staff_roles()))
 *     .route("/marks", web::post().to(create_mark))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::middlewares::{RequireJWT, create_error_response};
use crate::models::{ErrorCode, users::entities::UserRole};

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 仅允许单一角色
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed: Rc::from([*role]),
        }
    }

    /// 允许其中任一角色
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| **r).collect(),
        }
    }

    fn permits(allowed: &[UserRole], role: Option<UserRole>) -> bool {
        role.is_some_and(|role| allowed.contains(&role))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let user_id = RequireJWT::extract_user_id(req.request());
            let role = RequireJWT::extract_user_role(req.request());

            if user_id.is_none() {
                info!("Role check without an authenticated user; RequireJWT must run first");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            }

            if RequireRole::permits(&allowed, role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "Access denied for user {:?} (role: {:?}) on {}. Allowed roles: {:?}",
                user_id,
                role,
                req.path(),
                allowed
            );
            Ok(req.into_response(
                create_error_response(StatusCode::FORBIDDEN, ErrorCode::Forbidden, "Access denied")
                    .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits_listed_roles_only() {
        let staff = RequireRole::new_any(UserRole::staff_roles());
        assert!(RequireRole::permits(&staff.allowed, Some(UserRole::Teacher)));
        assert!(RequireRole::permits(&staff.allowed, Some(UserRole::Management)));
        assert!(!RequireRole::permits(&staff.allowed, Some(UserRole::Student)));
        assert!(!RequireRole::permits(&staff.allowed, Some(UserRole::Parent)));
        assert!(!RequireRole::permits(&staff.allowed, None));
    }

    #[test]
    fn test_single_role() {
        let student = RequireRole::new(&UserRole::Student);
        assert!(RequireRole::permits(&student.allowed, Some(UserRole::Student)));
        assert!(!RequireRole::permits(&student.allowed, Some(UserRole::Management)));
    }
}
