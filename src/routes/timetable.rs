use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::timetable::requests::TimetableQuery;
use crate::services::TimetableService;

static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);

pub async fn list_timetable(
    req: HttpRequest,
    query: web::Query<TimetableQuery>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .list_timetable(query.into_inner(), &req)
        .await
}

pub fn configure_timetable_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/timetable")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_timetable)),
    );
}
