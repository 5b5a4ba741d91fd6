use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 账号 ID
    pub role: String,       // 签发时的角色
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,         // 过期时间
    pub iat: usize,         // 签发时间
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

// 登录时签发的一对 token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry);
        Self::sign(&Self::secret(), user_id, role, ACCESS_TOKEN, expiry)
    }

    // 生成 Refresh Token；remember_me 时使用更长的有效期
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = token_expiry.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Self::sign(&Self::secret(), user_id, role, REFRESH_TOKEN, expiry)
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_token_expiry)?,
        })
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(&Self::secret(), token, ACCESS_TOKEN)
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(&Self::secret(), token, REFRESH_TOKEN)
    }

    fn sign(
        secret: &str,
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    // 验证签名、过期时间以及 token 类型
    fn verify(
        secret: &str,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        max_age: chrono::Duration,
    ) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::seconds(
                max_age.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 创建空的 Refresh Token Cookie，用于清除失效的 token
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, "")
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_access_token_round_trip() {
        let token = JwtUtils::sign(
            SECRET,
            7,
            "TEACHER",
            ACCESS_TOKEN,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        let claims = JwtUtils::verify(SECRET, &token, ACCESS_TOKEN).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.role, "TEACHER");
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token = JwtUtils::sign(
            SECRET,
            7,
            "STUDENT",
            REFRESH_TOKEN,
            chrono::Duration::days(1),
        )
        .unwrap();
        assert!(JwtUtils::verify(SECRET, &token, ACCESS_TOKEN).is_err());
        assert!(JwtUtils::verify(SECRET, &token, REFRESH_TOKEN).is_ok());
    }

    #[test]
    fn test_wrong_secret_and_expired_tokens_fail() {
        let token = JwtUtils::sign(
            SECRET,
            1,
            "MANAGEMENT",
            ACCESS_TOKEN,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        assert!(JwtUtils::verify("other-secret", &token, ACCESS_TOKEN).is_err());

        let expired = JwtUtils::sign(
            SECRET,
            1,
            "MANAGEMENT",
            ACCESS_TOKEN,
            chrono::Duration::hours(-2),
        )
        .unwrap();
        assert!(JwtUtils::verify(SECRET, &expired, ACCESS_TOKEN).is_err());
    }
}
