use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 用户创建请求（注册与初始化管理员共用）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub semester: Option<i32>,
    pub enrollment_no: Option<String>,
}

// 资料更新请求；角色与邮箱不可修改，出现未知字段直接拒绝
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub semester: Option<i32>,
    pub avatar: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.semester.is_none()
            && self.avatar.is_none()
    }
}

// 用户列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub active_only: Option<bool>,
}
