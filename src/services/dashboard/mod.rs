pub mod pages;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::dashboard::PageDescriptor;
use crate::models::users::entities::UserRole;

/// 仪表盘页面表：(角色, key, 标题, 数据接口)
///
/// 接口中的 `{user_id}` 由前端替换为当前账号 ID。
const PAGE_TABLE: &[(UserRole, &str, &str, &str)] = &[
    (UserRole::Student, "dashboard", "Dashboard", "/api/v1/students/{user_id}"),
    (UserRole::Student, "attendance", "Attendance", "/api/v1/students/{user_id}/attendance"),
    (UserRole::Student, "timetable", "Timetable", "/api/v1/timetable"),
    (UserRole::Student, "lms", "Study Material", "/api/v1/subjects"),
    (UserRole::Student, "assignments", "Assignments", "/api/v1/assignments"),
    (UserRole::Student, "results", "Results", "/api/v1/students/{user_id}/marks"),
    (UserRole::Student, "notices", "Notices", "/api/v1/notices"),
    (UserRole::Student, "grievance", "Student Support", "/api/v1/grievances"),
    (UserRole::Teacher, "dashboard", "Dashboard", "/api/v1/teachers/{user_id}"),
    (UserRole::Teacher, "mark_attendance", "Mark Attendance", "/api/v1/students/attendance"),
    (UserRole::Teacher, "students_list", "My Students", "/api/v1/students"),
    (UserRole::Teacher, "upload_ppt", "Upload PPT", "/api/v1/subjects"),
    (UserRole::Teacher, "upload_marks", "Upload Marks", "/api/v1/teachers/marks"),
    (UserRole::Teacher, "assignments", "Assignments", "/api/v1/assignments"),
    (UserRole::Teacher, "timetable", "Timetable", "/api/v1/timetable"),
    (UserRole::Teacher, "queries", "Queries", "/api/v1/grievances"),
    (UserRole::Parent, "notices", "Notices", "/api/v1/notices"),
    (UserRole::Parent, "timetable", "Timetable", "/api/v1/timetable"),
    (UserRole::Parent, "teachers", "Faculty", "/api/v1/teachers"),
    (UserRole::Parent, "grievance", "Contact", "/api/v1/grievances"),
    (UserRole::Management, "students", "Students", "/api/v1/students"),
    (UserRole::Management, "teachers", "Teachers", "/api/v1/teachers"),
    (UserRole::Management, "users", "Accounts", "/api/v1/users"),
    (UserRole::Management, "subjects", "Subjects", "/api/v1/subjects"),
    (UserRole::Management, "notices", "Notices", "/api/v1/notices"),
    (UserRole::Management, "grievances", "Grievances", "/api/v1/grievances"),
];

/// 角色可见的页面，按表中顺序
pub fn pages_for(role: UserRole) -> Vec<PageDescriptor> {
    PAGE_TABLE
        .iter()
        .filter(|(r, ..)| *r == role)
        .map(|(_, key, title, api)| PageDescriptor {
            key: (*key).to_string(),
            title: (*title).to_string(),
            api: (*api).to_string(),
        })
        .collect()
}

pub struct DashboardService;

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 当前角色的页面列表
    pub async fn list_pages(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        pages::list_pages(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_pages() {
        for role in UserRole::all_roles() {
            assert!(!pages_for(**role).is_empty(), "{role} has no pages");
        }
    }

    #[test]
    fn test_keys_unique_per_role() {
        for role in UserRole::all_roles() {
            let pages = pages_for(**role);
            let mut keys: Vec<&str> = pages.iter().map(|p| p.key.as_str()).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), pages.len());
        }
    }

    #[test]
    fn test_student_menu_order() {
        let keys: Vec<String> = pages_for(UserRole::Student)
            .into_iter()
            .map(|p| p.key)
            .collect();
        assert_eq!(keys.first().map(String::as_str), Some("dashboard"));
        assert!(keys.contains(&"results".to_string()));
        assert!(!keys.contains(&"mark_attendance".to_string()));
    }

    #[test]
    fn test_parent_gets_shared_pages_only() {
        let pages = pages_for(UserRole::Parent);
        assert!(pages.iter().all(|p| !p.api.contains("/students")));
    }
}
