use super::entities::{Grievance, GrievanceStatus};
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

pub const ANONYMOUS_NAME: &str = "Anonymous";

/// 申诉的对外视图
///
/// 匿名申诉只显示 "Anonymous"，学号与院系一律隐藏。
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grievance.ts")]
pub struct GrievanceResponse {
    pub id: i64,
    pub category: String,
    pub description: String,
    pub status: GrievanceStatus,
    pub is_anonymous: bool,
    pub user_name: String,
    pub enrollment_no: Option<String>,
    pub department: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl GrievanceResponse {
    /// 唯一的构造入口
    pub fn from_parts(grievance: Grievance, author: Option<&User>) -> Self {
        let (user_name, enrollment_no, department) = if grievance.is_anonymous {
            (ANONYMOUS_NAME.to_string(), None, None)
        } else {
            match author {
                Some(user) => (
                    user.name.clone(),
                    user.enrollment_no.clone(),
                    user.department.clone(),
                ),
                None => ("Unknown".to_string(), None, None),
            }
        };

        Self {
            id: grievance.id,
            category: grievance.category,
            description: grievance.description,
            status: grievance.status,
            is_anonymous: grievance.is_anonymous,
            user_name,
            enrollment_no,
            department,
            created_at: grievance.created_at,
            resolved_at: grievance.resolved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn author() -> User {
        User {
            id: 7,
            name: "Asha Rao".to_string(),
            email: "asha@campus.edu".to_string(),
            password_hash: String::new(),
            role: UserRole::Student,
            department: Some("CSE".to_string()),
            semester: Some(5),
            enrollment_no: Some("CS2023-017".to_string()),
            avatar: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn grievance(is_anonymous: bool) -> Grievance {
        Grievance {
            id: 1,
            user_id: 7,
            category: "Hostel".to_string(),
            description: "Water supply".to_string(),
            status: GrievanceStatus::Open,
            is_anonymous,
            created_at: chrono::Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn test_anonymous_grievance_hides_identity() {
        let user = author();
        let resp = GrievanceResponse::from_parts(grievance(true), Some(&user));
        assert_eq!(resp.user_name, ANONYMOUS_NAME);
        assert!(resp.enrollment_no.is_none());
        assert!(resp.department.is_none());

        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("Asha"));
        assert!(!json.contains("CS2023-017"));
        assert!(!json.contains("user_id"));
    }

    #[test]
    fn test_named_grievance_shows_author() {
        let user = author();
        let resp = GrievanceResponse::from_parts(grievance(false), Some(&user));
        assert_eq!(resp.user_name, "Asha Rao");
        assert_eq!(resp.enrollment_no.as_deref(), Some("CS2023-017"));
    }
}
