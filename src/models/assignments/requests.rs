use super::entities::SubmissionStatus;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub subject_id: i64,
    pub description: Option<String>,
    /// YYYY-MM-DD
    pub deadline: Option<String>,
    pub max_marks: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub submission_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradeSubmissionRequest {
    pub student_id: i64,
    pub marks: i32,
    /// 缺省时使用作业的满分
    pub max_marks: Option<i32>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListQuery {
    pub subject_id: Option<i64>,
    /// 仅对学生生效，按本人提交状态筛选
    pub status: Option<SubmissionStatus>,
}
