use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub subject_id: i64,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub max_marks: i32,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 提交状态
///
/// Pending 不落库：没有提交记录即视为 Pending。
/// 状态只能 Pending -> Submitted -> Graded，已批改的提交不可再提交。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum SubmissionStatus {
    Pending,
    Submitted,
    Graded,
}

impl SubmissionStatus {
    /// 当前状态下是否允许（重新）提交
    pub fn can_submit(self) -> bool {
        matches!(self, SubmissionStatus::Pending | SubmissionStatus::Submitted)
    }

    /// 当前状态下是否允许批改；已批改的允许重新批改
    pub fn can_grade(self) -> bool {
        matches!(self, SubmissionStatus::Submitted | SubmissionStatus::Graded)
    }

    /// 根据可能存在的提交记录得出实际状态
    pub fn of(submission: Option<&Submission>) -> Self {
        submission.map_or(SubmissionStatus::Pending, |s| s.status)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "Pending"),
            SubmissionStatus::Submitted => write!(f, "Submitted"),
            SubmissionStatus::Graded => write!(f, "Graded"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(SubmissionStatus::Pending),
            "Submitted" => Ok(SubmissionStatus::Submitted),
            "Graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 作业提交，(assignment_id, student_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub submission_url: Option<String>,
    pub marks: Option<i32>,
    pub max_marks: Option<i32>,
    pub remarks: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub graded_by: Option<i64>,
}

/// 待创建的作业（已校验）
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub subject_id: i64,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub max_marks: i32,
    pub created_by: i64,
}

/// 批改参数（已校验 0 <= marks <= max_marks）
#[derive(Debug, Clone)]
pub struct GradeSubmission {
    pub assignment_id: i64,
    pub student_id: i64,
    pub marks: i32,
    pub max_marks: i32,
    pub remarks: Option<String>,
    pub graded_by: i64,
}

/// 提交的结果
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Submitted(Submission),
    AlreadyGraded,
}

/// 批改的结果
#[derive(Debug, Clone)]
pub enum GradeOutcome {
    Graded(Submission),
    /// 学生尚未提交
    NotSubmitted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_lifecycle_rules() {
        assert!(SubmissionStatus::Pending.can_submit());
        assert!(SubmissionStatus::Submitted.can_submit());
        assert!(!SubmissionStatus::Graded.can_submit());

        assert!(!SubmissionStatus::Pending.can_grade());
        assert!(SubmissionStatus::Submitted.can_grade());
        assert!(SubmissionStatus::Graded.can_grade());
    }

    #[test]
    fn test_missing_row_is_pending() {
        assert_eq!(SubmissionStatus::of(None), SubmissionStatus::Pending);
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Submitted,
            SubmissionStatus::Graded,
        ] {
            assert_eq!(status.to_string().parse::<SubmissionStatus>(), Ok(status));
        }
    }
}
