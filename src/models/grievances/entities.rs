use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 申诉状态，只能向前推进：Open -> In Progress -> Resolved
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grievance.ts")]
pub enum GrievanceStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl GrievanceStatus {
    pub const ALL: [GrievanceStatus; 3] = [
        GrievanceStatus::Open,
        GrievanceStatus::InProgress,
        GrievanceStatus::Resolved,
    ];

    fn rank(self) -> u8 {
        match self {
            GrievanceStatus::Open => 0,
            GrievanceStatus::InProgress => 1,
            GrievanceStatus::Resolved => 2,
        }
    }

    /// 是否允许从当前状态迁移到 `next`；原地迁移与回退均不允许
    pub fn can_transition_to(self, next: GrievanceStatus) -> bool {
        next.rank() > self.rank()
    }

    /// 可以迁移到 `next` 的所有前驱状态
    pub fn predecessors_of(next: GrievanceStatus) -> Vec<GrievanceStatus> {
        Self::ALL
            .into_iter()
            .filter(|s| s.can_transition_to(next))
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GrievanceStatus::Open => "Open",
            GrievanceStatus::InProgress => "In Progress",
            GrievanceStatus::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GrievanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(GrievanceStatus::Open),
            "In Progress" => Ok(GrievanceStatus::InProgress),
            "Resolved" => Ok(GrievanceStatus::Resolved),
            _ => Err(format!("Invalid grievance status: {s}")),
        }
    }
}

/// 申诉记录
///
/// 不实现 Serialize：对外输出必须经过 `GrievanceResponse`，以保证匿名申诉不泄露身份。
#[derive(Debug, Clone)]
pub struct Grievance {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub description: String,
    pub status: GrievanceStatus,
    pub is_anonymous: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 申诉查询条件
#[derive(Debug, Clone, Default)]
pub struct GrievanceFilter {
    pub user_id: Option<i64>,
    pub status: Option<GrievanceStatus>,
}

/// 状态迁移结果
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    Updated(Grievance),
    Rejected { current: GrievanceStatus },
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_only_move_forward() {
        use GrievanceStatus::*;
        assert!(Open.can_transition_to(InProgress));
        assert!(Open.can_transition_to(Resolved));
        assert!(InProgress.can_transition_to(Resolved));

        assert!(!Open.can_transition_to(Open));
        assert!(!InProgress.can_transition_to(Open));
        assert!(!Resolved.can_transition_to(InProgress));
        assert!(!Resolved.can_transition_to(Resolved));
    }

    #[test]
    fn test_predecessors() {
        use GrievanceStatus::*;
        assert!(GrievanceStatus::predecessors_of(Open).is_empty());
        assert_eq!(GrievanceStatus::predecessors_of(InProgress), vec![Open]);
        assert_eq!(
            GrievanceStatus::predecessors_of(Resolved),
            vec![Open, InProgress]
        );
    }

    #[test]
    fn test_in_progress_wire_name() {
        let json = serde_json::to_string(&GrievanceStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        assert_eq!(
            "In Progress".parse::<GrievanceStatus>(),
            Ok(GrievanceStatus::InProgress)
        );
    }
}
