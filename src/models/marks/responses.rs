use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct MarkView {
    pub id: i64,
    pub subject_id: i64,
    pub subject: String,
    pub subject_code: String,
    pub exam_type: String,
    pub marks: i32,
    pub max_marks: i32,
    pub semester: Option<i32>,
}

/// 单门课程的成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct SubjectMarkSummary {
    pub subject_id: i64,
    pub subject: String,
    pub exam_count: u32,
    pub average_marks: Option<f64>,
    pub max_marks: Option<i32>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct StudentMarksResponse {
    pub marks: Vec<MarkView>,
    /// 没有成绩时为 null
    pub cgpa: Option<f64>,
}
