//! 预导入模块，方便使用

pub use super::assignment_submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::grievances::{
    ActiveModel as GrievanceActiveModel, Entity as Grievances, Model as GrievanceModel,
};
pub use super::marks::{ActiveModel as MarkActiveModel, Entity as Marks, Model as MarkModel};
pub use super::notices::{ActiveModel as NoticeActiveModel, Entity as Notices, Model as NoticeModel};
pub use super::study_materials::{
    ActiveModel as StudyMaterialActiveModel, Entity as StudyMaterials,
    Model as StudyMaterialModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::timetable::{
    ActiveModel as TimetableActiveModel, Entity as Timetable, Model as TimetableModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
