use super::entities::AttendanceStatus;
use serde::Deserialize;
use ts_rs::TS;

// 考勤登记请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub student_id: i64,
    pub subject_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    pub status: AttendanceStatus,
}

// 学生考勤查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceQuery {
    pub subject_id: Option<i64>,
    /// YYYY-MM
    pub month: Option<String>,
}
