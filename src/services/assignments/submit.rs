use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::{
    entities::SubmitOutcome, requests::SubmitAssignmentRequest, responses::SubmissionView,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{conflict, current_requester, not_found};

pub async fn submit_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    submit_request: SubmitAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    // 只能以本人名义提交
    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::Submission,
        Action::Write,
        Some(requester.id),
    ) {
        return Ok(e.to_response("submit assignment"));
    }

    let storage = service.get_storage(request);
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => return Ok(e.to_response("submit assignment")),
    }

    let submission_url = submit_request
        .submission_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    match storage
        .submit_assignment(assignment_id, requester.id, submission_url)
        .await
    {
        Ok(SubmitOutcome::Submitted(submission)) => {
            tracing::debug!(
                "Student {} submitted assignment {}",
                requester.id,
                assignment_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionView::from_submission(submission),
                "Assignment submitted successfully",
            )))
        }
        Ok(SubmitOutcome::AlreadyGraded) => Ok(conflict(
            ErrorCode::SubmissionAlreadyGraded,
            "Submission has already been graded and cannot be changed",
        )),
        Err(e) => Ok(e.to_response("submit assignment")),
    }
}
