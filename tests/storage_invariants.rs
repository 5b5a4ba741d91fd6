//! 存储层约束测试：在临时 SQLite 文件上运行迁移后直接调用 Storage。

use std::sync::Arc;

use actix_web::http::StatusCode;
use chrono::NaiveDate;
use tempfile::TempDir;

use campus_portal::config::DatabaseConfig;
use campus_portal::models::DeleteOutcome;
use campus_portal::models::assignments::entities::{
    GradeOutcome, GradeSubmission, NewAssignment, SubmissionStatus, SubmitOutcome,
};
use campus_portal::models::attendance::entities::{AttendanceFilter, AttendanceStatus, NewAttendance};
use campus_portal::models::grievances::entities::{GrievanceStatus, TransitionOutcome};
use campus_portal::models::grievances::requests::CreateGrievanceRequest;
use campus_portal::models::notices::entities::NoticeCategory;
use campus_portal::models::notices::requests::CreateNoticeRequest;
use campus_portal::models::subjects::requests::CreateSubjectRequest;
use campus_portal::models::users::entities::{User, UserRole};
use campus_portal::models::users::requests::CreateUserRequest;
use campus_portal::storage::Storage;
use campus_portal::storage::sea_orm_storage::SeaOrmStorage;

async fn open_storage() -> (TempDir, Arc<SeaOrmStorage>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        pool_size: 4,
        timeout: 10,
    };
    let storage = SeaOrmStorage::connect(&config).await.unwrap();
    (dir, Arc::new(storage))
}

async fn add_user(storage: &SeaOrmStorage, email: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password: "$argon2id$placeholder".to_string(),
            role,
            department: Some("CSE".to_string()),
            semester: (role == UserRole::Student).then_some(5),
            enrollment_no: None,
        })
        .await
        .unwrap()
}

async fn add_subject(storage: &SeaOrmStorage, code: &str) -> i64 {
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

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
}

#[tokio::test]
async fn test_attendance_upsert_keeps_one_row_per_key() {
    let (_dir, storage) = open_storage().await;
    let student = add_user(&storage, "s1@campus.edu", UserRole::Student).await;
    let teacher = add_user(&storage, "t1@campus.edu", UserRole::Teacher).await;
    let subject = add_subject(&storage, "CS501").await;

    let first = storage
        .upsert_attendance(NewAttendance {
            student_id: student.id,
            subject_id: subject,
            date: day(3),
            status: AttendanceStatus::Absent,
            marked_by: teacher.id,
        })
        .await
        .unwrap();
    let second = storage
        .upsert_attendance(NewAttendance {
            student_id: student.id,
            subject_id: subject,
            date: day(3),
            status: AttendanceStatus::Present,
            marked_by: teacher.id,
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, AttendanceStatus::Present);

    let rows = storage
        .list_attendance(student.id, AttendanceFilter::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, AttendanceStatus::Present);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_attendance_upserts_converge() {
    let (_dir, storage) = open_storage().await;
    let student = add_user(&storage, "s2@campus.edu", UserRole::Student).await;
    let teacher = add_user(&storage, "t2@campus.edu", UserRole::Teacher).await;
    let subject = add_subject(&storage, "CS502").await;
    let (student_id, teacher_id) = (student.id, teacher.id);

    let mut handles = Vec::new();
    for i in 0..8 {
        let storage = storage.clone();
        let status = if i % 2 == 0 {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Leave
        };
        handles.push(tokio::spawn(async move {
            storage
                .upsert_attendance(NewAttendance {
                    student_id,
                    subject_id: subject,
                    date: day(10),
                    status,
                    marked_by: teacher_id,
                })
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rows = storage
        .list_attendance(
            student_id,
            AttendanceFilter {
                subject_id: Some(subject),
                month: Some("2026-02".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submits_keep_one_submission() {
    let (_dir, storage) = open_storage().await;
    let student = add_user(&storage, "s6@campus.edu", UserRole::Student).await;
    let teacher = add_user(&storage, "t6@campus.edu", UserRole::Teacher).await;
    let subject = add_subject(&storage, "CS507").await;
    let assignment = storage
        .create_assignment(NewAssignment {
            title: "Essay".to_string(),
            subject_id: subject,
            description: None,
            deadline: None,
            max_marks: 10,
            created_by: teacher.id,
        })
        .await
        .unwrap();
    let (assignment_id, student_id) = (assignment.id, student.id);

    let mut handles = Vec::new();
    for i in 0..8 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .submit_assignment(
                    assignment_id,
                    student_id,
                    Some(format!("https://files.example/draft-{i}")),
                )
                .await
        }));
    }
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
    }

    let submissions = storage
        .list_submissions_for_assignment(assignment_id)
        .await
        .unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].student_id, student_id);
    assert_eq!(submissions[0].status, SubmissionStatus::Submitted);
}

#[tokio::test]
async fn test_submission_lifecycle() {
    let (_dir, storage) = open_storage().await;
    let student = add_user(&storage, "s3@campus.edu", UserRole::Student).await;
    let teacher = add_user(&storage, "t3@campus.edu", UserRole::Teacher).await;
    let subject = add_subject(&storage, "CS503").await;

    let assignment = storage
        .create_assignment(NewAssignment {
            title: "Lab 1".to_string(),
            subject_id: subject,
            description: None,
            deadline: Some(day(20)),
            max_marks: 20,
            created_by: teacher.id,
        })
        .await
        .unwrap();

    // 未提交时不能批改
    let outcome = storage
        .grade_submission(GradeSubmission {
            assignment_id: assignment.id,
            student_id: student.id,
            marks: 10,
            max_marks: 20,
            remarks: None,
            graded_by: teacher.id,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, GradeOutcome::NotSubmitted));

    // 重复提交覆盖同一行
    for url in ["https://files.example/v1", "https://files.example/v2"] {
        let outcome = storage
            .submit_assignment(assignment.id, student.id, Some(url.to_string()))
            .await
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
    }
    let submissions = storage
        .list_submissions_for_assignment(assignment.id)
        .await
        .unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].submission_url.as_deref(),
        Some("https://files.example/v2")
    );
    assert_eq!(submissions[0].status, SubmissionStatus::Submitted);

    let graded = match storage
        .grade_submission(GradeSubmission {
            assignment_id: assignment.id,
            student_id: student.id,
            marks: 18,
            max_marks: 20,
            remarks: Some("Good".to_string()),
            graded_by: teacher.id,
        })
        .await
        .unwrap()
    {
        GradeOutcome::Graded(submission) => submission,
        GradeOutcome::NotSubmitted => panic!("submission should be gradable"),
    };
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.marks, Some(18));
    assert_eq!(graded.max_marks, Some(20));
    assert!(graded.graded_at.is_some());
    assert_eq!(graded.graded_by, Some(teacher.id));

    // 已批改后不能再提交
    let outcome = storage
        .submit_assignment(assignment.id, student.id, Some("https://files.example/v3".to_string()))
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::AlreadyGraded));

    let stored = storage
        .get_submission(assignment.id, student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.marks, Some(18));
    assert_eq!(
        stored.submission_url.as_deref(),
        Some("https://files.example/v2")
    );

    // 有提交的作业不能删除
    assert_eq!(
        storage.delete_assignment(assignment.id).await.unwrap(),
        DeleteOutcome::InUse
    );
}

#[tokio::test]
async fn test_grievance_status_moves_forward_only() {
    let (_dir, storage) = open_storage().await;
    let student = add_user(&storage, "s4@campus.edu", UserRole::Student).await;

    let grievance = storage
        .create_grievance(
            student.id,
            CreateGrievanceRequest {
                category: "Hostel".to_string(),
                description: "Water supply".to_string(),
                is_anonymous: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(grievance.status, GrievanceStatus::Open);
    assert!(grievance.resolved_at.is_none());

    let updated = storage
        .transition_grievance(grievance.id, GrievanceStatus::InProgress)
        .await
        .unwrap();
    assert!(matches!(
        updated,
        TransitionOutcome::Updated(ref g) if g.status == GrievanceStatus::InProgress && g.resolved_at.is_none()
    ));

    let back = storage
        .transition_grievance(grievance.id, GrievanceStatus::Open)
        .await
        .unwrap();
    assert!(matches!(
        back,
        TransitionOutcome::Rejected {
            current: GrievanceStatus::InProgress
        }
    ));

    match storage
        .transition_grievance(grievance.id, GrievanceStatus::Resolved)
        .await
        .unwrap()
    {
        TransitionOutcome::Updated(g) => {
            assert_eq!(g.status, GrievanceStatus::Resolved);
            assert!(g.resolved_at.is_some());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let again = storage
        .transition_grievance(grievance.id, GrievanceStatus::Resolved)
        .await
        .unwrap();
    assert!(matches!(again, TransitionOutcome::Rejected { .. }));

    let missing = storage
        .transition_grievance(grievance.id + 100, GrievanceStatus::Resolved)
        .await
        .unwrap();
    assert!(matches!(missing, TransitionOutcome::NotFound));
}

#[tokio::test]
async fn test_referenced_subject_cannot_be_deleted() {
    let (_dir, storage) = open_storage().await;
    let student = add_user(&storage, "s5@campus.edu", UserRole::Student).await;
    let teacher = add_user(&storage, "t5@campus.edu", UserRole::Teacher).await;
    let used = add_subject(&storage, "CS505").await;
    let unused = add_subject(&storage, "CS506").await;

    storage
        .upsert_attendance(NewAttendance {
            student_id: student.id,
            subject_id: used,
            date: day(5),
            status: AttendanceStatus::Present,
            marked_by: teacher.id,
        })
        .await
        .unwrap();

    assert_eq!(storage.delete_subject(used).await.unwrap(), DeleteOutcome::InUse);
    assert_eq!(storage.delete_subject(unused).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(storage.delete_subject(unused).await.unwrap(), DeleteOutcome::NotFound);
    assert!(storage.get_subject_by_id(used).await.unwrap().is_some());
}

#[tokio::test]
async fn test_notices_pinned_first_then_newest() {
    let (_dir, storage) = open_storage().await;
    let admin = add_user(&storage, "admin@campus.edu", UserRole::Management).await;

    let mut ids = Vec::new();
    for (title, pinned) in [("Old", false), ("Pinned", true), ("New", false)] {
        let notice = storage
            .create_notice(
                CreateNoticeRequest {
                    title: title.to_string(),
                    content: format!("{title} content"),
                    category: NoticeCategory::General,
                    is_pinned: pinned,
                },
                admin.id,
            )
            .await
            .unwrap();
        ids.push(notice.id);
    }

    let listed: Vec<i64> = storage
        .list_notices(None, 10)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(listed, vec![ids[1], ids[2], ids[0]]);

    let limited = storage.list_notices(None, 2).await.unwrap();
    assert_eq!(limited.len(), 2);

    let exams = storage
        .list_notices(Some(NoticeCategory::Exam), 10)
        .await
        .unwrap();
    assert!(exams.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let (_dir, storage) = open_storage().await;
    add_user(&storage, "dup@campus.edu", UserRole::Parent).await;

    let err = storage
        .create_user(CreateUserRequest {
            name: "Second".to_string(),
            email: "dup@campus.edu".to_string(),
            password: "$argon2id$placeholder".to_string(),
            role: UserRole::Parent,
            department: None,
            semester: None,
            enrollment_no: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(storage.count_users().await.unwrap(), 1);
}
