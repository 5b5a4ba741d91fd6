use serde::Deserialize;
use ts_rs::TS;

// 录入成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct CreateMarkRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub exam_type: String,
    pub marks: i32,
    pub max_marks: i32,
    pub semester: Option<i32>,
}

// 修改成绩分数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct UpdateMarkRequest {
    pub marks: i32,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct MarksQuery {
    pub semester: Option<i32>,
}
