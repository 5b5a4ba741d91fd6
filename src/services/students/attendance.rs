use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{StudentService, load_student};
use crate::errors::{PortalError, Result};
use crate::models::attendance::{
    entities::{AttendanceFilter, AttendanceRecord, NewAttendance},
    requests::{AttendanceQuery, MarkAttendanceRequest},
    responses::{AttendanceRecordView, StudentAttendanceResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::aggregation::summarize_attendance;
use crate::services::{bad_request, current_requester};
use crate::storage::Storage;
use crate::utils::validate::{parse_date, validate_month};

async fn build_attendance(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    filter: AttendanceFilter,
) -> Result<StudentAttendanceResponse> {
    load_student(storage, student_id).await?;

    let filtered = filter.subject_id.is_some() || filter.month.is_some();
    let records = storage.list_attendance(student_id, filter).await?;
    // 汇总总是基于全部考勤
    let summary = if filtered {
        let all = storage
            .list_attendance(student_id, AttendanceFilter::default())
            .await?;
        summarize_attendance(&all)
    } else {
        summarize_attendance(&records)
    };

    let subject_ids: Vec<i64> = records.iter().map(|r| r.subject_id).collect();
    let subjects = storage.get_subjects_by_ids(&subject_ids).await?;

    let records = records
        .into_iter()
        .map(|record| {
            let subject = subjects.get(&record.subject_id);
            AttendanceRecordView {
                id: record.id,
                subject_id: record.subject_id,
                subject: subject.map(|s| s.name.clone()).unwrap_or_default(),
                subject_code: subject.map(|s| s.code.clone()).unwrap_or_default(),
                date: record.date,
                status: record.status,
            }
        })
        .collect();

    Ok(StudentAttendanceResponse { records, summary })
}

pub async fn get_attendance(
    service: &StudentService,
    student_id: i64,
    query: AttendanceQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) =
        AccessPolicy::check(&requester, Resource::Attendance, Action::Read, Some(student_id))
    {
        return Ok(e.to_response("fetch attendance"));
    }

    if let Some(month) = &query.month
        && let Err(msg) = validate_month(month)
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let filter = AttendanceFilter {
        subject_id: query.subject_id,
        month: query.month,
    };

    let storage = service.get_storage(request);
    match build_attendance(&storage, student_id, filter).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("fetch attendance")),
    }
}

/// 校验学生与课程后写入；同一学生同一课程同一天只保留一条
async fn record_attendance(
    storage: &Arc<dyn Storage>,
    req: MarkAttendanceRequest,
    marked_by: i64,
) -> Result<AttendanceRecord> {
    let date = parse_date(&req.date).map_err(PortalError::validation)?;

    load_student(storage, req.student_id).await?;
    if storage.get_subject_by_id(req.subject_id).await?.is_none() {
        return Err(PortalError::not_found("Subject not found"));
    }

    storage
        .upsert_attendance(NewAttendance {
            student_id: req.student_id,
            subject_id: req.subject_id,
            date,
            status: req.status,
            marked_by,
        })
        .await
}

pub async fn mark_attendance(
    service: &StudentService,
    mark_request: MarkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::Attendance,
        Action::Write,
        Some(mark_request.student_id),
    ) {
        return Ok(e.to_response("mark attendance"));
    }

    let storage = service.get_storage(request);
    match record_attendance(&storage, mark_request, requester.id).await {
        Ok(record) => {
            tracing::debug!(
                "Attendance {} for student {} on {} marked by {}",
                record.status,
                record.student_id,
                record.date,
                requester.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance marked successfully",
            )))
        }
        Err(e) => Ok(e.to_response("mark attendance")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::subjects::requests::CreateSubjectRequest;
    use crate::models::users::entities::UserRole;
    use crate::services::testing::{add_user, memory_storage};

    #[actix_web::test]
    async fn test_attendance_not_recorded_for_deactivated_student() {
        let storage = memory_storage().await;
        let student = add_user(&storage, "left@campus.edu", UserRole::Student).await;
        let teacher = add_user(&storage, "t@campus.edu", UserRole::Teacher).await;
        let subject = storage
            .create_subject(CreateSubjectRequest {
                name: "Networks".to_string(),
                code: "CS401".to_string(),
                department: None,
                semester: Some(7),
            })
            .await
            .unwrap();
        storage.deactivate_user(student.id).await.unwrap();

        let err = record_attendance(
            &storage,
            MarkAttendanceRequest {
                student_id: student.id,
                subject_id: subject.id,
                date: "2026-02-10".to_string(),
                status: AttendanceStatus::Present,
            },
            teacher.id,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));

        let rows = storage
            .list_attendance(student.id, AttendanceFilter::default())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
