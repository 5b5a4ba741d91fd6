use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::{AssignmentService, assignment_views, submission_view};
use crate::errors::{PortalError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::responses::{AssignmentView, SubmissionView};
use crate::models::users::{entities::UserRole, requests::UserListQuery};
use crate::services::access::{AccessPolicy, Action, Requester, Resource};
use crate::services::current_requester;
use crate::storage::Storage;

/// 全部提交；在读学生中尚未提交的以 Pending 列出
async fn all_submissions(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<Vec<SubmissionView>> {
    let submissions = storage.list_submissions_for_assignment(assignment_id).await?;
    let students = storage
        .list_users(UserListQuery {
            role: Some(UserRole::Student),
            active_only: Some(true),
        })
        .await?;

    let submitter_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
    let directory = storage.get_users_by_ids(&submitter_ids).await?;
    let mut by_student: HashMap<i64, _> = submissions
        .into_iter()
        .map(|s| (s.student_id, s))
        .collect();

    let mut views = Vec::with_capacity(students.len());
    for student in students {
        let view = match by_student.remove(&student.id) {
            Some(submission) => submission_view(submission, &directory),
            None => SubmissionView {
                student_name: Some(student.name.clone()),
                enrollment_no: student.enrollment_no.clone(),
                ..SubmissionView::pending(student.id)
            },
        };
        views.push(view);
    }

    // 已停用学生的历史提交
    let mut remaining: Vec<_> = by_student.into_values().collect();
    remaining.sort_by_key(|s| s.id);
    views.extend(remaining.into_iter().map(|s| submission_view(s, &directory)));

    Ok(views)
}

async fn build_detail(
    storage: &Arc<dyn Storage>,
    requester: &Requester,
    assignment_id: i64,
) -> Result<AssignmentView> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| PortalError::not_found("Assignment not found"))?;

    let mut view = assignment_views(storage, vec![assignment])
        .await?
        .pop()
        .ok_or_else(|| PortalError::not_found("Assignment not found"))?;

    if requester.role == UserRole::Student {
        view.submission = Some(
            match storage.get_submission(assignment_id, requester.id).await? {
                Some(submission) => SubmissionView::from_submission(submission),
                None => SubmissionView::pending(requester.id),
            },
        );
    } else if requester.role.is_staff() {
        view.submissions = Some(all_submissions(storage, assignment_id).await?);
    }

    Ok(view)
}

pub async fn get_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Assignment, Action::Read, None) {
        return Ok(e.to_response("get assignment"));
    }

    let storage = service.get_storage(request);
    match build_detail(&storage, &requester, assignment_id).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            view,
            "Assignment retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("get assignment")),
    }
}
