use super::entities::Notice;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub notice: Notice,
    pub created_by_name: Option<String>,
}
