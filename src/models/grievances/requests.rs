use super::entities::GrievanceStatus;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grievance.ts")]
pub struct CreateGrievanceRequest {
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grievance.ts")]
pub struct UpdateGrievanceStatusRequest {
    pub status: GrievanceStatus,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grievance.ts")]
pub struct GrievanceListQuery {
    /// 状态名，"All" 表示不筛选
    pub status: Option<String>,
    /// 仅看自己的申诉；学生与家长总是只能看到自己的
    pub my_grievances: Option<bool>,
}
