use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::{AssignmentService, assignment_views};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::assignments::{
    entities::SubmissionStatus,
    requests::AssignmentListQuery,
    responses::{AssignmentView, SubmissionView},
};
use crate::models::users::entities::UserRole;
use crate::services::access::{AccessPolicy, Action, Requester, Resource};
use crate::services::current_requester;
use crate::storage::Storage;

async fn build_list(
    storage: &Arc<dyn Storage>,
    requester: &Requester,
    query: AssignmentListQuery,
) -> Result<Vec<AssignmentView>> {
    let assignments = storage.list_assignments(query.subject_id).await?;
    let mut views = assignment_views(storage, assignments).await?;

    if requester.role != UserRole::Student {
        return Ok(views);
    }

    // 学生视角：附带本人提交，没有提交记录即为 Pending
    let mut submissions: HashMap<i64, _> = storage
        .list_submissions_for_student(requester.id)
        .await?
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    for view in &mut views {
        view.submission = Some(match submissions.remove(&view.assignment.id) {
            Some(submission) => SubmissionView::from_submission(submission),
            None => SubmissionView::pending(requester.id),
        });
    }

    if let Some(status) = query.status {
        views.retain(|view| {
            view.submission
                .as_ref()
                .map_or(SubmissionStatus::Pending, |s| s.status)
                == status
        });
    }

    Ok(views)
}

pub async fn list_assignments(
    service: &AssignmentService,
    query: AssignmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(&requester, Resource::Assignment, Action::Read, None) {
        return Ok(e.to_response("fetch assignments"));
    }

    let storage = service.get_storage(request);
    match build_list(&storage, &requester, query).await {
        Ok(views) => Ok(HttpResponse::Ok().json(ApiResponse::success_list(
            views,
            "Assignments retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("fetch assignments")),
    }
}
