//! 安全的路径参数提取器
//!
//! 路径中的 `{id}` 解析失败时直接返回统一格式的 400 响应，
//! 而不是 actix 默认的纯文本错误。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 正整数 ID 路径参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl SafeIDI64 {
    fn parse(raw: Option<&str>) -> Result<i64, String> {
        let raw = raw.ok_or_else(|| "Missing id in path".to_string())?;
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(format!("Invalid id: {raw}")),
        }
    }
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = Self::parse(req.match_info().get("id")).map(SafeIDI64).map_err(|msg| {
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg.clone()));
            InternalError::from_response(msg, response).into()
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_ids_only() {
        assert_eq!(SafeIDI64::parse(Some("42")), Ok(42));
        assert!(SafeIDI64::parse(Some("0")).is_err());
        assert!(SafeIDI64::parse(Some("-3")).is_err());
        assert!(SafeIDI64::parse(Some("1; DROP TABLE users")).is_err());
        assert!(SafeIDI64::parse(None).is_err());
    }
}
