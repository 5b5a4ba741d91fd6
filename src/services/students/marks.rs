use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{StudentService, load_student};
use crate::errors::Result;
use crate::models::marks::{
    requests::MarksQuery,
    responses::{MarkView, StudentMarksResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::aggregation::cgpa;
use crate::services::{bad_request, current_requester};
use crate::storage::Storage;
use crate::utils::validate::validate_semester;

async fn build_marks(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    semester: Option<i32>,
) -> Result<StudentMarksResponse> {
    load_student(storage, student_id).await?;

    let entries = storage.list_marks(student_id, semester).await?;
    // CGPA 始终基于全部成绩
    let cgpa = match semester {
        Some(_) => cgpa(&storage.list_marks(student_id, None).await?)?,
        None => cgpa(&entries)?,
    };

    let subject_ids: Vec<i64> = entries.iter().map(|e| e.subject_id).collect();
    let subjects = storage.get_subjects_by_ids(&subject_ids).await?;

    let marks = entries
        .into_iter()
        .map(|entry| {
            let subject = subjects.get(&entry.subject_id);
            MarkView {
                id: entry.id,
                subject_id: entry.subject_id,
                subject: subject.map(|s| s.name.clone()).unwrap_or_default(),
                subject_code: subject.map(|s| s.code.clone()).unwrap_or_default(),
                exam_type: entry.exam_type,
                marks: entry.marks,
                max_marks: entry.max_marks,
                semester: entry.semester,
            }
        })
        .collect();

    Ok(StudentMarksResponse { marks, cgpa })
}

pub async fn get_marks(
    service: &StudentService,
    student_id: i64,
    query: MarksQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) =
        AccessPolicy::check(&requester, Resource::Marks, Action::Read, Some(student_id))
    {
        return Ok(e.to_response("fetch marks"));
    }

    if let Some(semester) = query.semester
        && let Err(msg) = validate_semester(semester)
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let storage = service.get_storage(request);
    match build_marks(&storage, student_id, query.semester).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Marks retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("fetch marks")),
    }
}
