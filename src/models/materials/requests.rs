use super::entities::ResourceType;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub unit_title: String,
    pub resource_name: String,
    pub resource_type: ResourceType,
    pub resource_url: Option<String>,
}
