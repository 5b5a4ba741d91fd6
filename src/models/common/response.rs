use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 列表数据的条数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            count: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl<T: TS> ApiResponse<Vec<T>> {
    /// 列表响应，附带条数
    pub fn success_list(items: Vec<T>, message: impl Into<String>) -> Self {
        let count = items.len();
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(items),
            count: Some(count),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            count: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code as i32,
            message: message.into(),
            data: None,
            count: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_carries_count() {
        let resp = ApiResponse::success_list(vec![1i32, 2, 3], "ok");
        assert!(resp.success);
        assert_eq!(resp.count, Some(3));

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["code"], 0);
    }

    #[test]
    fn test_error_response_omits_data() {
        let resp = ApiResponse::error_empty(ErrorCode::Forbidden, "Access denied");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], ErrorCode::Forbidden as i32);
        assert!(json.get("data").is_none());
        assert!(json.get("count").is_none());
    }
}
