use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub enum NoticeCategory {
    Exam,
    Event,
    Holiday,
    General,
}

impl std::fmt::Display for NoticeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NoticeCategory::Exam => "Exam",
            NoticeCategory::Event => "Event",
            NoticeCategory::Holiday => "Holiday",
            NoticeCategory::General => "General",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for NoticeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Exam" => Ok(NoticeCategory::Exam),
            "Event" => Ok(NoticeCategory::Event),
            "Holiday" => Ok(NoticeCategory::Holiday),
            "General" => Ok(NoticeCategory::General),
            _ => Err(format!("Invalid notice category: {s}")),
        }
    }
}

// 公告，置顶优先、其次按时间倒序
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub is_pinned: bool,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
