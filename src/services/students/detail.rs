use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::{StudentService, load_student};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::attendance::{entities::AttendanceFilter, responses::SubjectAttendance};
use crate::models::marks::responses::SubjectMarkSummary;
use crate::models::subjects::entities::Subject;
use crate::models::users::responses::StudentDetailResponse;
use crate::services::access::{AccessPolicy, Action, Resource};
use crate::services::aggregation::{attendance_by_subject, cgpa, subject_mark_summary};
use crate::services::current_requester;
use crate::storage::Storage;

pub(crate) async fn build_detail(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<StudentDetailResponse> {
    let student = load_student(storage, student_id).await?;
    let records = storage
        .list_attendance(student_id, AttendanceFilter::default())
        .await?;
    let entries = storage.list_marks(student_id, None).await?;

    // 每门课程都列出，没有记录的课程汇总值为 null
    let subjects: HashMap<i64, Subject> = storage
        .list_subjects()
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    let subject_ids: Vec<i64> = subjects.keys().copied().collect();

    let attendance = attendance_by_subject(&subject_ids, &records)
        .into_iter()
        .map(|(subject_id, summary)| {
            let subject = subjects.get(&subject_id);
            SubjectAttendance {
                subject_id,
                subject: subject.map(|s| s.name.clone()).unwrap_or_default(),
                subject_code: subject.map(|s| s.code.clone()).unwrap_or_default(),
                summary,
            }
        })
        .collect();

    let marks = subject_mark_summary(&subject_ids, &entries)
        .into_iter()
        .map(|tally| SubjectMarkSummary {
            subject_id: tally.subject_id,
            subject: subjects
                .get(&tally.subject_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            exam_count: tally.exam_count,
            average_marks: tally.average_marks,
            max_marks: tally.max_marks,
        })
        .collect();

    Ok(StudentDetailResponse {
        student,
        attendance,
        marks,
        cgpa: cgpa(&entries)?,
    })
}

pub async fn get_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let requester = match current_requester(request) {
        Ok(requester) => requester,
        Err(response) => return Ok(response),
    };
    if let Err(e) = AccessPolicy::check(
        &requester,
        Resource::StudentDirectory,
        Action::Read,
        Some(student_id),
    ) {
        return Ok(e.to_response("get student"));
    }

    let storage = service.get_storage(request);
    match build_detail(&storage, student_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Student details retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response("get student")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortalError;
    use crate::models::attendance::entities::{AttendanceStatus, NewAttendance};
    use crate::models::subjects::requests::CreateSubjectRequest;
    use crate::models::users::entities::UserRole;
    use crate::services::testing::{add_user, memory_storage};

    async fn add_subject(storage: &Arc<dyn Storage>, code: &str) -> i64 {
        storage
            .create_subject(CreateSubjectRequest {
                name: format!("Subject {code}"),
                code: code.to_string(),
                department: Some("CSE".to_string()),
                semester: Some(5),
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_subject_without_sessions_is_listed_with_null_values() {
        let storage = memory_storage().await;
        let student = add_user(&storage, "s1@campus.edu", UserRole::Student).await;
        let teacher = add_user(&storage, "t1@campus.edu", UserRole::Teacher).await;
        let attended = add_subject(&storage, "CS301").await;
        let untouched = add_subject(&storage, "CS302").await;

        storage
            .upsert_attendance(NewAttendance {
                student_id: student.id,
                subject_id: attended,
                date: chrono::NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
                status: AttendanceStatus::Present,
                marked_by: teacher.id,
            })
            .await
            .unwrap();

        let detail = build_detail(&storage, student.id).await.unwrap();

        assert_eq!(detail.attendance.len(), 2);
        let empty = detail
            .attendance
            .iter()
            .find(|a| a.subject_id == untouched)
            .unwrap();
        assert_eq!(empty.subject_code, "CS302");
        assert_eq!(empty.summary.total_classes, 0);
        assert_eq!(empty.summary.attendance_percentage, None);

        let json = serde_json::to_value(empty).unwrap();
        assert!(json["attendance_percentage"].is_null());

        let present = detail
            .attendance
            .iter()
            .find(|a| a.subject_id == attended)
            .unwrap();
        assert_eq!(present.summary.attendance_percentage, Some(100.0));

        assert_eq!(detail.marks.len(), 2);
        assert!(detail.marks.iter().all(|m| m.average_marks.is_none()));
        assert_eq!(detail.cgpa, None);
    }

    #[actix_web::test]
    async fn test_deactivated_student_is_not_found() {
        let storage = memory_storage().await;
        let student = add_user(&storage, "gone@campus.edu", UserRole::Student).await;
        assert!(storage.deactivate_user(student.id).await.unwrap());

        let err = build_detail(&storage, student.id).await.unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
