use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色，创建后不可修改
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Student,    // 学生
    Teacher,    // 教师
    Parent,     // 家长
    Management, // 管理层
}

impl UserRole {
    pub const STUDENT: &'static str = "STUDENT";
    pub const TEACHER: &'static str = "TEACHER";
    pub const PARENT: &'static str = "PARENT";
    pub const MANAGEMENT: &'static str = "MANAGEMENT";

    pub fn management_roles() -> &'static [&'static UserRole] {
        &[&Self::Management]
    }
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Management]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Student,
            &Self::Teacher,
            &Self::Parent,
            &Self::Management,
        ]
    }

    /// 可以通过公开注册获得的角色
    pub fn is_self_registrable(&self) -> bool {
        !matches!(self, UserRole::Management)
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Teacher | UserRole::Management)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: STUDENT, TEACHER, PARENT, MANAGEMENT"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Parent => write!(f, "{}", UserRole::PARENT),
            UserRole::Management => write!(f, "{}", UserRole::MANAGEMENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::PARENT => Ok(UserRole::Parent),
            UserRole::MANAGEMENT => Ok(UserRole::Management),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub semester: Option<i32>,
    pub enrollment_no: Option<String>,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(&parsed, *role);
        }
    }

    #[test]
    fn test_role_rejects_lowercase() {
        assert!("student".parse::<UserRole>().is_err());
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }

    #[test]
    fn test_management_cannot_self_register() {
        assert!(!UserRole::Management.is_self_registrable());
        assert!(UserRole::Parent.is_self_registrable());
    }
}
