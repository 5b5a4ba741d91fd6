//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及到 HTTP 响应的映射。
//! 存储层错误的细节只写入日志，响应体中只返回通用提示。

use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(PortalError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    DatabaseConfig("E001", "Database Configuration Error", SERVICE_UNAVAILABLE),
    DatabaseConnection("E002", "Database Connection Error", SERVICE_UNAVAILABLE),
    DatabaseOperation("E003", "Database Operation Error", SERVICE_UNAVAILABLE),
    Validation("E004", "Validation Error", BAD_REQUEST),
    NotFound("E005", "Resource Not Found", NOT_FOUND),
    Conflict("E006", "Conflict", CONFLICT),
    Authorization("E007", "Authorization Error", FORBIDDEN),
    Authentication("E008", "Authentication Error", UNAUTHORIZED),
    Serialization("E009", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E010", "Date Parse Error", BAD_REQUEST),
    DataIntegrity("E011", "Data Integrity Error", UNPROCESSABLE_ENTITY),
}

impl PortalError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为存储层故障（细节不可返回给客户端）
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            PortalError::DatabaseConfig(_)
                | PortalError::DatabaseConnection(_)
                | PortalError::DatabaseOperation(_)
                | PortalError::Serialization(_)
        )
    }

    /// 对应的响应错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            PortalError::Validation(_) | PortalError::DateParse(_) => ErrorCode::ValidationFailed,
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::Conflict(_) => ErrorCode::Conflict,
            PortalError::Authorization(_) => ErrorCode::Forbidden,
            PortalError::Authentication(_) => ErrorCode::Unauthorized,
            PortalError::DataIntegrity(_) => ErrorCode::DataIntegrity,
            PortalError::Serialization(_) => ErrorCode::InternalServerError,
            PortalError::DatabaseConfig(_)
            | PortalError::DatabaseConnection(_)
            | PortalError::DatabaseOperation(_) => ErrorCode::StoreUnavailable,
        }
    }

    /// 转换为统一的错误响应
    ///
    /// `context` 用于日志与通用提示，例如 "fetch attendance"。
    pub fn to_response(&self, context: &str) -> HttpResponse {
        let message = if self.is_store_failure() {
            tracing::error!("Failed to {}: {}", context, self.format_simple());
            format!("Failed to {context}, please try again later")
        } else {
            self.message().to_string()
        };

        HttpResponse::build(self.status())
            .json(ApiResponse::error_empty(self.error_code(), message))
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortalError::database_config("test").code(), "E001");
        assert_eq!(PortalError::validation("test").code(), "E004");
        assert_eq!(PortalError::conflict("test").code(), "E006");
        assert_eq!(PortalError::data_integrity("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            PortalError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(PortalError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(PortalError::authorization("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(PortalError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            PortalError::database_operation("x").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_failure_detection() {
        assert!(PortalError::database_operation("UNIQUE constraint failed").is_store_failure());
        assert!(!PortalError::validation("bad date").is_store_failure());
    }

    #[test]
    fn test_store_failure_response_hides_details() {
        let err = PortalError::database_operation("SELECT * FROM users: disk I/O error");
        let resp = err.to_response("fetch students");
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_db_err_conversion() {
        let err: PortalError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::validation("Invalid date");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid date"));
    }
}
