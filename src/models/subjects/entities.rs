use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub department: Option<String>,
    pub semester: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
