use super::entities::{Assignment, Submission, SubmissionStatus};
use serde::Serialize;
use ts_rs::TS;

/// 提交视图；Pending 时没有 id
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionView {
    pub id: Option<i64>,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub enrollment_no: Option<String>,
    pub status: SubmissionStatus,
    pub submission_url: Option<String>,
    pub marks: Option<i32>,
    pub max_marks: Option<i32>,
    pub remarks: Option<String>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SubmissionView {
    pub fn pending(student_id: i64) -> Self {
        Self {
            id: None,
            student_id,
            student_name: None,
            enrollment_no: None,
            status: SubmissionStatus::Pending,
            submission_url: None,
            marks: None,
            max_marks: None,
            remarks: None,
            submitted_at: None,
            graded_at: None,
        }
    }

    pub fn from_submission(submission: Submission) -> Self {
        Self {
            id: Some(submission.id),
            student_id: submission.student_id,
            student_name: None,
            enrollment_no: None,
            status: submission.status,
            submission_url: submission.submission_url,
            marks: submission.marks,
            max_marks: submission.max_marks,
            remarks: submission.remarks,
            submitted_at: Some(submission.submitted_at),
            graded_at: submission.graded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub created_by_name: Option<String>,
    /// 学生本人的提交（学生视角）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionView>,
    /// 全部提交（教师与管理层视角）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<SubmissionView>>,
}
