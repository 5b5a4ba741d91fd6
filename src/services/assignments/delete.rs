use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, DeleteOutcome, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{conflict, current_requester, not_found};

pub async fn delete_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Assignment, Action::Write, None) {
        return Ok(e.to_response("delete assignment"));
    }

    let storage = service.get_storage(request);
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => return Ok(e.to_response("delete assignment")),
    };

    // 教师只能删除自己发布的作业
    if requester.role == UserRole::Teacher && assignment.created_by != Some(requester.id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the author can delete this assignment",
        )));
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(DeleteOutcome::Deleted) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Assignment deleted successfully",
        ))),
        Ok(DeleteOutcome::NotFound) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Ok(DeleteOutcome::InUse) => Ok(conflict(
            ErrorCode::AssignmentHasSubmissions,
            "Assignment already has submissions and cannot be deleted",
        )),
        Err(e) => Ok(e.to_response("delete assignment")),
    }
}
