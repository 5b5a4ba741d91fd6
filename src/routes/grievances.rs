use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grievances::requests::{
    CreateGrievanceRequest, GrievanceListQuery, UpdateGrievanceStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GrievanceService;
use crate::utils::SafeIDI64;

static GRIEVANCE_SERVICE: Lazy<GrievanceService> = Lazy::new(GrievanceService::new_lazy);

pub async fn list_grievances(
    req: HttpRequest,
    query: web::Query<GrievanceListQuery>,
) -> ActixResult<HttpResponse> {
    GRIEVANCE_SERVICE
        .list_grievances(query.into_inner(), &req)
        .await
}

pub async fn get_grievance(req: HttpRequest, grievance_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GRIEVANCE_SERVICE.get_grievance(grievance_id.0, &req).await
}

pub async fn create_grievance(
    req: HttpRequest,
    grievance_data: web::Json<CreateGrievanceRequest>,
) -> ActixResult<HttpResponse> {
    GRIEVANCE_SERVICE
        .create_grievance(grievance_data.into_inner(), &req)
        .await
}

pub async fn update_status(
    req: HttpRequest,
    grievance_id: SafeIDI64,
    status_data: web::Json<UpdateGrievanceStatusRequest>,
) -> ActixResult<HttpResponse> {
    GRIEVANCE_SERVICE
        .update_status(grievance_id.0, status_data.into_inner(), &req)
        .await
}

pub async fn delete_grievance(
    req: HttpRequest,
    grievance_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GRIEVANCE_SERVICE
        .delete_grievance(grievance_id.0, &req)
        .await
}

// 配置路由
pub fn configure_grievance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grievances")
            .wrap(middlewares::RequireJWT)
            // 列表与详情的可见范围在服务层按角色收窄
            .route("", web::get().to(list_grievances))
            .route("", web::post().to(create_grievance))
            .route("/{id}", web::get().to(get_grievance))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::management_roles()))
                    .route("/{id}/status", web::put().to(update_status))
                    .route("/{id}", web::delete().to(delete_grievance)),
            ),
    );
}
