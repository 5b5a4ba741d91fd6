//! 访问控制
//!
//! 所有"谁能读写什么"的判断集中在 [`AccessPolicy::decide`]，
//! 服务层在读取或修改记录之前调用它，路由中间件只做按角色的粗粒度准入。

use crate::errors::PortalError;
use crate::models::users::entities::UserRole;

/// 发起请求的账号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub id: i64,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// 单个账号的资料
    Profile,
    /// 全部账号列表
    AccountDirectory,
    /// 学生名册及学生详情
    StudentDirectory,
    /// 教师名册及教师详情
    TeacherDirectory,
    Attendance,
    Marks,
    Submission,
    /// 作业批改
    Grade,
    Grievance,
    /// 申诉状态变更与删除
    GrievanceResolution,
    Assignment,
    Notice,
    Timetable,
    Subject,
    StudyMaterial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allow
    }

    /// 拒绝时转换为授权错误
    pub fn require(self) -> Result<(), PortalError> {
        match self {
            Access::Allow => Ok(()),
            Access::Deny => Err(PortalError::authorization("Access denied")),
        }
    }
}

impl From<bool> for Access {
    fn from(allowed: bool) -> Self {
        if allowed { Access::Allow } else { Access::Deny }
    }
}

pub struct AccessPolicy;

impl AccessPolicy {
    /// 判断 `requester` 能否对 `resource` 执行 `action`
    ///
    /// `owner` 为目标记录所属账号；列表类请求没有单一归属时传 `None`，
    /// 此时只有不依赖归属的规则可能放行。
    pub fn decide(
        requester: &Requester,
        resource: Resource,
        action: Action,
        owner: Option<i64>,
    ) -> Access {
        use Action::*;
        use Resource::*;

        let is_owner = owner == Some(requester.id);

        match requester.role {
            UserRole::Management => Access::Allow,

            UserRole::Teacher => match (resource, action) {
                (Profile, _) => is_owner.into(),
                (AccountDirectory, _) | (GrievanceResolution, _) => Access::Deny,
                (Notice | Subject, Write) => Access::Deny,
                (StudentDirectory | TeacherDirectory, Write) => Access::Deny,
                // 申诉只能以本人名义提交
                (Grievance, Write) => is_owner.into(),
                (Submission, Write) => Access::Deny,
                _ => Access::Allow,
            },

            UserRole::Student => match (resource, action) {
                (Profile, _) => is_owner.into(),
                (StudentDirectory | Attendance | Marks | Submission, Read) => is_owner.into(),
                (Submission, Write) => is_owner.into(),
                (Grievance, _) => is_owner.into(),
                (TeacherDirectory | Assignment | Notice | Timetable | Subject | StudyMaterial, Read) => {
                    Access::Allow
                }
                _ => Access::Deny,
            },

            // 数据模型中没有家长与学生的关联，家长只能访问公共资源和本人的记录
            UserRole::Parent => match (resource, action) {
                (Profile, _) => is_owner.into(),
                (Grievance, _) => is_owner.into(),
                (TeacherDirectory | Notice | Timetable | Subject | StudyMaterial, Read) => {
                    Access::Allow
                }
                _ => Access::Deny,
            },
        }
    }

    /// 便捷方法：不允许时返回授权错误
    pub fn check(
        requester: &Requester,
        resource: Resource,
        action: Action,
        owner: Option<i64>,
    ) -> Result<(), PortalError> {
        Self::decide(requester, resource, action, owner).require()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Action::*;
    use Resource::*;

    const ALL_RESOURCES: [Resource; 15] = [
        Profile,
        AccountDirectory,
        StudentDirectory,
        TeacherDirectory,
        Attendance,
        Marks,
        Submission,
        Grade,
        Grievance,
        GrievanceResolution,
        Assignment,
        Notice,
        Timetable,
        Subject,
        StudyMaterial,
    ];

    fn who(id: i64, role: UserRole) -> Requester {
        Requester { id, role }
    }

    #[test]
    fn test_management_is_unrestricted() {
        let admin = who(1, UserRole::Management);
        for resource in ALL_RESOURCES {
            for action in [Read, Write] {
                assert!(AccessPolicy::decide(&admin, resource, action, Some(99)).is_allowed());
                assert!(AccessPolicy::decide(&admin, resource, action, None).is_allowed());
            }
        }
    }

    #[test]
    fn test_student_reads_only_own_records() {
        let s1 = who(10, UserRole::Student);
        for resource in [Attendance, Marks, Submission, StudentDirectory] {
            assert!(AccessPolicy::decide(&s1, resource, Read, Some(10)).is_allowed());
            assert!(!AccessPolicy::decide(&s1, resource, Read, Some(11)).is_allowed());
            assert!(!AccessPolicy::decide(&s1, resource, Read, None).is_allowed());
        }
    }

    #[test]
    fn test_student_writes_only_own_submission_and_grievance() {
        let s1 = who(10, UserRole::Student);
        assert!(AccessPolicy::decide(&s1, Submission, Write, Some(10)).is_allowed());
        assert!(!AccessPolicy::decide(&s1, Submission, Write, Some(11)).is_allowed());
        assert!(AccessPolicy::decide(&s1, Grievance, Write, Some(10)).is_allowed());
        assert!(!AccessPolicy::decide(&s1, Grievance, Write, Some(11)).is_allowed());
        for resource in [Attendance, Marks, Grade, Assignment, Notice, Timetable, Subject] {
            assert!(!AccessPolicy::decide(&s1, resource, Write, Some(10)).is_allowed());
        }
        assert!(!AccessPolicy::decide(&s1, GrievanceResolution, Write, Some(10)).is_allowed());
    }

    #[test]
    fn test_student_sees_shared_resources() {
        let s1 = who(10, UserRole::Student);
        for resource in [Notice, Timetable, Subject, StudyMaterial, Assignment, TeacherDirectory] {
            assert!(AccessPolicy::decide(&s1, resource, Read, None).is_allowed());
        }
        assert!(!AccessPolicy::decide(&s1, AccountDirectory, Read, None).is_allowed());
    }

    #[test]
    fn test_teacher_manages_academic_records() {
        let t = who(5, UserRole::Teacher);
        for resource in [Assignment, Grade, Marks, Timetable, Attendance, StudyMaterial] {
            assert!(AccessPolicy::decide(&t, resource, Write, Some(42)).is_allowed());
        }
        for resource in [Attendance, Marks, Submission, Grievance, StudentDirectory] {
            assert!(AccessPolicy::decide(&t, resource, Read, Some(42)).is_allowed());
        }
        assert!(!AccessPolicy::decide(&t, Notice, Write, None).is_allowed());
        assert!(!AccessPolicy::decide(&t, Subject, Write, None).is_allowed());
        assert!(!AccessPolicy::decide(&t, GrievanceResolution, Write, Some(42)).is_allowed());
        assert!(!AccessPolicy::decide(&t, AccountDirectory, Read, None).is_allowed());
    }

    #[test]
    fn test_profile_update_is_self_service() {
        for role in [UserRole::Student, UserRole::Teacher, UserRole::Parent] {
            let me = who(3, role);
            assert!(AccessPolicy::decide(&me, Profile, Write, Some(3)).is_allowed());
            assert!(!AccessPolicy::decide(&me, Profile, Write, Some(4)).is_allowed());
        }
    }

    #[test]
    fn test_parent_limited_to_shared_and_own() {
        let p = who(20, UserRole::Parent);
        for resource in [Notice, Timetable, Subject, StudyMaterial, TeacherDirectory] {
            assert!(AccessPolicy::decide(&p, resource, Read, None).is_allowed());
        }
        for resource in [Attendance, Marks, Submission, StudentDirectory, Assignment] {
            assert!(!AccessPolicy::decide(&p, resource, Read, Some(10)).is_allowed());
        }
        assert!(AccessPolicy::decide(&p, Grievance, Read, Some(20)).is_allowed());
        assert!(!AccessPolicy::decide(&p, Grievance, Read, Some(10)).is_allowed());
    }

    #[test]
    fn test_denial_becomes_authorization_error() {
        let s1 = who(10, UserRole::Student);
        let err = AccessPolicy::check(&s1, Grievance, Read, Some(11)).unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unknown_owner_denied_like_foreign_owner() {
        let s1 = who(10, UserRole::Student);
        let foreign = AccessPolicy::check(&s1, Grievance, Read, Some(11)).unwrap_err();
        let unknown = AccessPolicy::check(&s1, Grievance, Read, None).unwrap_err();
        assert_eq!(foreign.status(), unknown.status());
        assert_eq!(foreign.code(), unknown.code());
        assert_eq!(foreign.message(), unknown.message());
    }
}
