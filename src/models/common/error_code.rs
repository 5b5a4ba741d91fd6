/// 响应错误码
///
/// 0 表示成功；1xxx 为通用错误，其余按业务模块分段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,
    InternalServerError = 1007,
    StoreUnavailable = 1008,
    DataIntegrity = 1009,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    AccountInactive = 2002,
    PasswordPolicyViolation = 2003,
    RoleNotAllowed = 2004,

    // 用户
    UserNotFound = 3000,
    UserEmailAlreadyExists = 3001,
    UserEmailInvalid = 3002,
    UserNameInvalid = 3003,
    CannotDeactivateSelf = 3004,

    // 课程
    SubjectNotFound = 4000,
    SubjectCodeAlreadyExists = 4001,
    SubjectInUse = 4002,

    // 作业与提交
    AssignmentNotFound = 5000,
    SubmissionAlreadyGraded = 5001,
    SubmissionNotSubmitted = 5002,
    MarksOutOfRange = 5003,
    AssignmentHasSubmissions = 5004,

    // 申诉
    GrievanceNotFound = 6000,
    InvalidStatusTransition = 6001,

    // 公告
    NoticeNotFound = 7000,

    // 成绩
    MarkNotFound = 8000,
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code as i32
    }
}
