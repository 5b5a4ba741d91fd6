use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::{
    entities::{GradeOutcome, GradeSubmission},
    requests::GradeSubmissionRequest,
    responses::SubmissionView,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::{bad_request, conflict, current_requester, not_found};
use crate::utils::validate::validate_marks;

pub async fn grade_submission(
    service: &AssignmentService,
    assignment_id: i64,
    grade_request: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::Grade,
        Action::Write,
        Some(grade_request.student_id),
    ) {
        return Ok(e.to_response("grade submission"));
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
        Err(e) => return Ok(e.to_response("grade submission")),
    };

    let max_marks = grade_request.max_marks.unwrap_or(assignment.max_marks);
    if let Err(msg) = validate_marks(grade_request.marks, max_marks) {
        return Ok(bad_request(ErrorCode::MarksOutOfRange, msg));
    }

    let grade = GradeSubmission {
        assignment_id,
        student_id: grade_request.student_id,
        marks: grade_request.marks,
        max_marks,
        remarks: grade_request
            .remarks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
        graded_by: requester.id,
    };

    match storage.grade_submission(grade).await {
        Ok(GradeOutcome::Graded(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionView::from_submission(submission),
            "Submission graded successfully",
        ))),
        Ok(GradeOutcome::NotSubmitted) => Ok(conflict(
            ErrorCode::SubmissionNotSubmitted,
            "Student has not submitted this assignment",
        )),
        Err(e) => Ok(e.to_response("grade submission")),
    }
}
