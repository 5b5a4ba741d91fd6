use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(Weekday::Monday),
            "Tuesday" => Ok(Weekday::Tuesday),
            "Wednesday" => Ok(Weekday::Wednesday),
            "Thursday" => Ok(Weekday::Thursday),
            "Friday" => Ok(Weekday::Friday),
            "Saturday" => Ok(Weekday::Saturday),
            "Sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

// 课表时段；不做冲突检测
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableSlot {
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day: Weekday,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub room: Option<String>,
    pub batch: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待创建的时段（已校验）
#[derive(Debug, Clone)]
pub struct NewTimetableSlot {
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub batch: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TimetableFilter {
    pub teacher_id: Option<i64>,
    pub batch: Option<String>,
}

/// 周一到周日、再按开始时间排序
pub fn sort_slots(slots: &mut [TimetableSlot]) {
    slots.sort_by(|a, b| {
        a.day
            .cmp(&b.day)
            .then_with(|| a.start_time.cmp(&b.start_time))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64, day: Weekday, start: &str) -> TimetableSlot {
        TimetableSlot {
            id,
            subject_id: 1,
            teacher_id: 2,
            day,
            start_time: start.to_string(),
            end_time: "23:59".to_string(),
            room: None,
            batch: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_sort_by_weekday_then_start() {
        let mut slots = vec![
            slot(1, Weekday::Wednesday, "09:00"),
            slot(2, Weekday::Monday, "11:00"),
            slot(3, Weekday::Monday, "08:30"),
            slot(4, Weekday::Saturday, "07:00"),
        ];
        sort_slots(&mut slots);
        let ids: Vec<i64> = slots.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }
}
