use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{AttendanceQuery, MarkAttendanceRequest};
use crate::models::marks::requests::MarksQuery;
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req).await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(student_id.0, &req).await
}

pub async fn get_attendance(
    req: HttpRequest,
    student_id: SafeIDI64,
    query: web::Query<AttendanceQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .get_attendance(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn get_marks(
    req: HttpRequest,
    student_id: SafeIDI64,
    query: web::Query<MarksQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .get_marks(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn mark_attendance(
    req: HttpRequest,
    mark_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .mark_attendance(mark_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            // 学生本人或教职工
            .route("/{id}", web::get().to(get_student))
            .route("/{id}/attendance", web::get().to(get_attendance))
            .route("/{id}/marks", web::get().to(get_marks))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("", web::get().to(list_students))
                    .route("/attendance", web::post().to(mark_attendance)),
            ),
    );
}
