use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::marks::requests::{CreateMarkRequest, UpdateMarkRequest};
use crate::models::timetable::requests::CreateTimetableRequest;
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(&req).await
}

pub async fn get_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(teacher_id.0, &req).await
}

pub async fn create_mark(
    req: HttpRequest,
    mark_data: web::Json<CreateMarkRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.create_mark(mark_data.into_inner(), &req).await
}

pub async fn update_mark(
    req: HttpRequest,
    mark_id: SafeIDI64,
    update_data: web::Json<UpdateMarkRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_mark(mark_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn create_timetable_slot(
    req: HttpRequest,
    slot_data: web::Json<CreateTimetableRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_timetable_slot(slot_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_teachers))
            .route("/{id}", web::get().to(get_teacher))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("/marks", web::post().to(create_mark))
                    .route("/marks/{id}", web::put().to(update_mark))
                    .route("/timetable", web::post().to(create_timetable_slot)),
            ),
    );
}
