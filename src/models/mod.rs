pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod grievances;
pub mod marks;
pub mod materials;
pub mod notices;
pub mod subjects;
pub mod system;
pub mod timetable;
pub mod users;

pub use common::{ApiResponse, AppStartTime, DeleteOutcome, ErrorCode};
