pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::{
    entities::{Assignment, Submission},
    requests::{
        AssignmentListQuery, CreateAssignmentRequest, GradeSubmissionRequest,
        SubmitAssignmentRequest,
    },
    responses::{AssignmentView, SubmissionView},
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_assignments(
        &self,
        query: AssignmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, query, request).await
    }

    pub async fn get_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, assignment_id, request).await
    }

    pub async fn create_assignment(
        &self,
        assignment_request: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, assignment_request, request).await
    }

    // 学生提交作业
    pub async fn submit(
        &self,
        assignment_id: i64,
        submit_request: SubmitAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, assignment_id, submit_request, request).await
    }

    // 批改
    pub async fn grade(
        &self,
        assignment_id: i64,
        grade_request: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, assignment_id, grade_request, request).await
    }

    pub async fn delete_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, assignment_id, request).await
    }
}

/// 补充课程与发布者信息，提交相关字段留空
pub(crate) async fn assignment_views(
    storage: &Arc<dyn Storage>,
    assignments: Vec<Assignment>,
) -> Result<Vec<AssignmentView>> {
    let subject_ids: Vec<i64> = assignments.iter().map(|a| a.subject_id).collect();
    let author_ids: Vec<i64> = assignments.iter().filter_map(|a| a.created_by).collect();
    let subjects = storage.get_subjects_by_ids(&subject_ids).await?;
    let authors = storage.get_users_by_ids(&author_ids).await?;

    Ok(assignments
        .into_iter()
        .map(|assignment| {
            let subject = subjects.get(&assignment.subject_id);
            AssignmentView {
                subject: subject.map(|s| s.name.clone()),
                subject_code: subject.map(|s| s.code.clone()),
                created_by_name: assignment
                    .created_by
                    .and_then(|id| authors.get(&id))
                    .map(|u| u.name.clone()),
                assignment,
                submission: None,
                submissions: None,
            }
        })
        .collect())
}

/// 带学生信息的提交视图
pub(crate) fn submission_view(submission: Submission, students: &HashMap<i64, User>) -> SubmissionView {
    let student = students.get(&submission.student_id);
    SubmissionView {
        student_name: student.map(|s| s.name.clone()),
        enrollment_no: student.and_then(|s| s.enrollment_no.clone()),
        ..SubmissionView::from_submission(submission)
    }
}
