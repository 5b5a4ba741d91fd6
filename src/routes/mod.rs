pub mod assignments;

pub mod auth;

pub mod dashboard;

pub mod grievances;

pub mod notices;

pub mod students;

pub mod subjects;

pub mod system;

pub mod teachers;

pub mod timetable;

pub mod users;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use grievances::configure_grievance_routes;
pub use notices::configure_notice_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use timetable::configure_timetable_routes;
pub use users::configure_user_routes;
