use super::entities::TimetableSlot;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableSlotView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub slot: TimetableSlot,
    pub subject: Option<String>,
    pub subject_code: Option<String>,
    pub teacher_name: Option<String>,
}

/// 教师详情：所授课程与课表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TeacherDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub teacher: User,
    pub subjects: Vec<Subject>,
    pub timetable: Vec<TimetableSlotView>,
}
