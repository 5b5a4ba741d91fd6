use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub enum ResourceType {
    Pdf,
    Video,
    Link,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Pdf => write!(f, "PDF"),
            ResourceType::Video => write!(f, "VIDEO"),
            ResourceType::Link => write!(f, "LINK"),
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PDF" => Ok(ResourceType::Pdf),
            "VIDEO" => Ok(ResourceType::Video),
            "LINK" => Ok(ResourceType::Link),
            _ => Err(format!("Invalid resource type: {s}")),
        }
    }
}

// 学习资料，按单元组织
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct StudyMaterial {
    pub id: i64,
    pub subject_id: i64,
    pub unit_title: String,
    pub resource_name: String,
    pub resource_type: ResourceType,
    pub resource_url: Option<String>,
    pub uploaded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
