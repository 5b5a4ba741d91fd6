use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::users::entities::UserRole;
use crate::services::SubjectService;
use crate::utils::SafeIDI64;

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

pub async fn get_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(subject_id.0, &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(subject_data.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(subject_id.0, &req).await
}

pub async fn list_materials(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_materials(subject_id.0, &req).await
}

pub async fn create_material(
    req: HttpRequest,
    subject_id: SafeIDI64,
    material_data: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_material(subject_id.0, material_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_subjects))
            .route("/{id}", web::get().to(get_subject))
            .route("/{id}/materials", web::get().to(list_materials))
            // 上传资料：教职工
            .service(
                web::resource("/{id}/materials")
                    .guard(guard::Post())
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::post().to(create_material)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::management_roles()))
                    .route("", web::post().to(create_subject))
                    .route("/{id}", web::delete().to(delete_subject)),
            ),
    );
}
