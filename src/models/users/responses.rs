use super::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 用户响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}

/// 学生详情：资料、各课程出勤与成绩汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: User,
    pub attendance: Vec<crate::models::attendance::responses::SubjectAttendance>,
    pub marks: Vec<crate::models::marks::responses::SubjectMarkSummary>,
    pub cgpa: Option<f64>,
}
