use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    DeleteOutcome,
    assignments::entities::{
        Assignment, GradeOutcome, GradeSubmission, NewAssignment, SubmitOutcome, Submission,
    },
    attendance::entities::{AttendanceFilter, AttendanceRecord, NewAttendance},
    grievances::{
        entities::{Grievance, GrievanceFilter, GrievanceStatus, TransitionOutcome},
        requests::CreateGrievanceRequest,
    },
    marks::entities::{MarkEntry, NewMark},
    materials::{entities::StudyMaterial, requests::CreateMaterialRequest},
    notices::{
        entities::{Notice, NoticeCategory},
        requests::{CreateNoticeRequest, UpdateNoticeRequest},
    },
    subjects::{entities::Subject, requests::CreateSubjectRequest},
    timetable::entities::{NewTimetableSlot, TimetableFilter, TimetableSlot},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须为已哈希的值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 批量获取用户，按 ID 索引
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, User>>;
    // 列出用户
    async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>>;
    // 更新用户资料
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新密码哈希
    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // 停用用户（软删除）
    async fn deactivate_user(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>>;
    async fn get_subjects_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 教师在课表中出现过的课程
    async fn list_subjects_taught_by(&self, teacher_id: i64) -> Result<Vec<Subject>>;
    // 删除课程；仍被引用时返回 InUse
    async fn delete_subject(&self, id: i64) -> Result<DeleteOutcome>;

    /// 考勤方法
    // 以 (student, subject, date) 为键原子写入
    async fn upsert_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord>;
    async fn list_attendance(
        &self,
        student_id: i64,
        filter: AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>>;

    /// 成绩方法
    async fn create_mark(&self, mark: NewMark) -> Result<MarkEntry>;
    async fn get_mark_by_id(&self, id: i64) -> Result<Option<MarkEntry>>;
    async fn update_mark_value(&self, id: i64, marks: i32) -> Result<Option<MarkEntry>>;
    async fn list_marks(&self, student_id: i64, semester: Option<i32>) -> Result<Vec<MarkEntry>>;

    /// 公告方法
    async fn create_notice(&self, notice: CreateNoticeRequest, created_by: i64) -> Result<Notice>;
    async fn get_notice_by_id(&self, id: i64) -> Result<Option<Notice>>;
    // 置顶优先，其次按时间倒序
    async fn list_notices(
        &self,
        category: Option<NoticeCategory>,
        limit: u64,
    ) -> Result<Vec<Notice>>;
    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>>;
    async fn delete_notice(&self, id: i64) -> Result<bool>;

    /// 作业与提交方法
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(&self, subject_id: Option<i64>) -> Result<Vec<Assignment>>;
    // 删除作业；已有提交时返回 InUse
    async fn delete_assignment(&self, id: i64) -> Result<DeleteOutcome>;
    // 原子提交；已批改的提交不可覆盖
    async fn submit_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission_url: Option<String>,
    ) -> Result<SubmitOutcome>;
    // 条件批改；只对已提交或已批改的记录生效
    async fn grade_submission(&self, grade: GradeSubmission) -> Result<GradeOutcome>;
    async fn get_submission(&self, assignment_id: i64, student_id: i64)
    -> Result<Option<Submission>>;
    async fn list_submissions_for_assignment(&self, assignment_id: i64)
    -> Result<Vec<Submission>>;
    async fn list_submissions_for_student(&self, student_id: i64) -> Result<Vec<Submission>>;

    /// 申诉方法
    async fn create_grievance(
        &self,
        user_id: i64,
        grievance: CreateGrievanceRequest,
    ) -> Result<Grievance>;
    async fn get_grievance_by_id(&self, id: i64) -> Result<Option<Grievance>>;
    async fn list_grievances(&self, filter: GrievanceFilter) -> Result<Vec<Grievance>>;
    // 条件更新状态，只允许向前迁移
    async fn transition_grievance(
        &self,
        id: i64,
        next: GrievanceStatus,
    ) -> Result<TransitionOutcome>;
    async fn delete_grievance(&self, id: i64) -> Result<bool>;

    /// 学习资料方法
    async fn create_material(
        &self,
        subject_id: i64,
        uploaded_by: i64,
        material: CreateMaterialRequest,
    ) -> Result<StudyMaterial>;
    async fn list_materials(&self, subject_id: i64) -> Result<Vec<StudyMaterial>>;

    /// 课表方法
    async fn create_timetable_slot(&self, slot: NewTimetableSlot) -> Result<TimetableSlot>;
    // 按星期与开始时间排序
    async fn list_timetable(&self, filter: TimetableFilter) -> Result<Vec<TimetableSlot>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
