use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考勤状态；只有 PRESENT 计入出勤
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "PRESENT"),
            AttendanceStatus::Absent => write!(f, "ABSENT"),
            AttendanceStatus::Leave => write!(f, "LEAVE"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRESENT" => Ok(AttendanceStatus::Present),
            "ABSENT" => Ok(AttendanceStatus::Absent),
            "LEAVE" => Ok(AttendanceStatus::Leave),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 考勤记录，(student_id, subject_id, date) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待写入的考勤（已校验）
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: i64,
}

/// 考勤查询条件
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub subject_id: Option<i64>,
    /// 形如 "2026-02"
    pub month: Option<String>,
}
