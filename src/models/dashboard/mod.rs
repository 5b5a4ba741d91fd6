use serde::Serialize;
use ts_rs::TS;

/// 仪表盘页面描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct PageDescriptor {
    pub key: String,
    pub title: String,
    /// 页面主要数据来源的接口
    pub api: String,
}
