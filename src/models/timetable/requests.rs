use super::entities::Weekday;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct CreateTimetableRequest {
    pub subject_id: i64,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub batch: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableQuery {
    pub teacher_id: Option<i64>,
    pub batch: Option<String>,
}
