use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("Invalid month regex"));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Invalid time regex"));

static ENROLLMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/_-]{1,32}$").expect("Invalid enrollment regex"));

const MAX_NAME_LEN: usize = 100;
const MAX_TEXT_LEN: usize = 5000;

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 邮箱统一按小写存储与比较
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

pub fn validate_enrollment_no(enrollment_no: &str) -> Result<(), &'static str> {
    if !ENROLLMENT_RE.is_match(enrollment_no) {
        return Err("Enrollment number may contain only letters, digits, '/', '_' or '-'");
    }
    Ok(())
}

pub fn validate_semester(semester: i32) -> Result<(), &'static str> {
    if !(1..=12).contains(&semester) {
        return Err("Semester must be between 1 and 12");
    }
    Ok(())
}

/// 必填文本：去除首尾空白后非空，且不超过长度上限
pub fn validate_required_text(value: &str, field: &'static str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(format!("{field} must be at most {MAX_TEXT_LEN} characters"));
    }
    Ok(())
}

/// 解析 YYYY-MM-DD 日期
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{value}', expected YYYY-MM-DD"))
}

/// 校验 YYYY-MM 月份
pub fn validate_month(value: &str) -> Result<(), String> {
    if !MONTH_RE.is_match(value) {
        return Err(format!("Invalid month '{value}', expected YYYY-MM"));
    }
    Ok(())
}

/// 校验 HH:MM（24 小时制）
pub fn validate_time(value: &str) -> Result<(), String> {
    if !TIME_RE.is_match(value) {
        return Err(format!("Invalid time '{value}', expected HH:MM"));
    }
    Ok(())
}

/// 校验时间段：开始早于结束
pub fn validate_time_range(start: &str, end: &str) -> Result<(), String> {
    validate_time(start)?;
    validate_time(end)?;
    // 固定宽度的 HH:MM 按字典序即时间序
    if start >= end {
        return Err("Start time must be earlier than end time".to_string());
    }
    Ok(())
}

/// 校验分数：满分为正，得分在 [0, 满分] 内
pub fn validate_marks(marks: i32, max_marks: i32) -> Result<(), String> {
    if max_marks <= 0 {
        return Err("Maximum marks must be greater than zero".to_string());
    }
    if marks < 0 || marks > max_marks {
        return Err(format!("Marks must be between 0 and {max_marks}"));
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "student1",
        "teacher1",
        "abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("Campus2026").is_valid);
    }

    #[test]
    fn test_password_policy_reports_every_failure() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Student1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("s1@college.edu").is_ok());
        assert!(validate_email("no-at-sign.edu").is_err());
        assert_eq!(normalize_email("  Ravi@College.EDU "), "ravi@college.edu");
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Asha Rao").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_dates_and_months() {
        assert_eq!(
            parse_date("2026-02-10").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
        );
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("10/02/2026").is_err());
        assert!(validate_month("2026-02").is_ok());
        assert!(validate_month("2026-13").is_err());
        assert!(validate_month("2026-2").is_err());
    }

    #[test]
    fn test_time_range() {
        assert!(validate_time_range("09:00", "10:00").is_ok());
        assert!(validate_time_range("10:00", "10:00").is_err());
        assert!(validate_time_range("9:00", "10:00").is_err());
        assert!(validate_time_range("23:00", "24:00").is_err());
    }

    #[test]
    fn test_marks_bounds() {
        assert!(validate_marks(18, 20).is_ok());
        assert!(validate_marks(0, 20).is_ok());
        assert!(validate_marks(20, 20).is_ok());
        assert!(validate_marks(21, 20).is_err());
        assert!(validate_marks(-1, 20).is_err());
        assert!(validate_marks(0, 0).is_err());
    }
}
