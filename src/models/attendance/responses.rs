use super::entities::AttendanceStatus;
use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

/// 出勤汇总；没有任何课次时百分比为 null
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub total_classes: u32,
    pub present_count: u32,
    pub absent_count: u32,
    pub leave_count: u32,
    pub attendance_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecordView {
    pub id: i64,
    pub subject_id: i64,
    pub subject: String,
    pub subject_code: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SubjectAttendance {
    pub subject_id: i64,
    pub subject: String,
    pub subject_code: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceResponse {
    pub records: Vec<AttendanceRecordView>,
    /// 该学生全部考勤的汇总（不受筛选条件影响）
    pub summary: AttendanceSummary,
}
