pub mod access;
pub mod aggregation;
pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod grievances;
pub mod notices;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod timetable;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use grievances::GrievanceService;
pub use notices::NoticeService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use timetable::TimetableService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use access::Requester;

/// 当前请求者；路由没有经过 RequireJWT 时返回 401 响应
pub(crate) fn current_requester(request: &HttpRequest) -> Result<Requester, HttpResponse> {
    RequireJWT::extract_requester(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}
