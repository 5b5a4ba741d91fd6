use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试成绩条目，同一学生同一课程可有多条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct MarkEntry {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub exam_type: String,
    pub marks: i32,
    pub max_marks: i32,
    pub semester: Option<i32>,
    pub entered_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待录入的成绩（已校验 0 <= marks <= max_marks）
#[derive(Debug, Clone)]
pub struct NewMark {
    pub student_id: i64,
    pub subject_id: i64,
    pub exam_type: String,
    pub marks: i32,
    pub max_marks: i32,
    pub semester: Option<i32>,
    pub entered_by: i64,
}
