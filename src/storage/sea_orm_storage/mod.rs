//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 每类资源的实现拆分在各自的文件中。

mod assignments;
mod attendance;
mod grievances;
mod marks;
mod materials;
mod notices;
mod subjects;
mod timetable;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定的数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + 外键约束）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt.journal_mode(SqliteJournalMode::Wal);
        }

        // 内存库每个连接都是独立的数据库，只能使用单连接
        let max_connections = if in_memory { 1 } else { config.pool_size.max(1) };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 对 ID 列表去重，供批量查询使用
pub(crate) fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// 唯一约束冲突转换为 Conflict，其余按数据库错误处理
pub(crate) fn map_insert_err(err: sea_orm::DbErr, conflict: &str, context: &str) -> PortalError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => PortalError::conflict(conflict),
        _ => PortalError::database_operation(format!("{context}: {err}")),
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users(&self, query: UserListQuery) -> Result<Vec<User>> {
        self.list_users_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_user_password_impl(id, password_hash).await
    }

    async fn deactivate_user(&self, id: i64) -> Result<bool> {
        self.deactivate_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>> {
        self.get_subject_by_code_impl(code).await
    }

    async fn get_subjects_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Subject>> {
        self.get_subjects_by_ids_impl(ids).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn list_subjects_taught_by(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_taught_by_impl(teacher_id).await
    }

    async fn delete_subject(&self, id: i64) -> Result<DeleteOutcome> {
        self.delete_subject_impl(id).await
    }

    // 考勤模块
    async fn upsert_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord> {
        self.upsert_attendance_impl(record).await
    }

    async fn list_attendance(
        &self,
        student_id: i64,
        filter: AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(student_id, filter).await
    }

    // 成绩模块
    async fn create_mark(&self, mark: NewMark) -> Result<MarkEntry> {
        self.create_mark_impl(mark).await
    }

    async fn get_mark_by_id(&self, id: i64) -> Result<Option<MarkEntry>> {
        self.get_mark_by_id_impl(id).await
    }

    async fn update_mark_value(&self, id: i64, marks: i32) -> Result<Option<MarkEntry>> {
        self.update_mark_value_impl(id, marks).await
    }

    async fn list_marks(&self, student_id: i64, semester: Option<i32>) -> Result<Vec<MarkEntry>> {
        self.list_marks_impl(student_id, semester).await
    }

    // 公告模块
    async fn create_notice(&self, notice: CreateNoticeRequest, created_by: i64) -> Result<Notice> {
        self.create_notice_impl(notice, created_by).await
    }

    async fn get_notice_by_id(&self, id: i64) -> Result<Option<Notice>> {
        self.get_notice_by_id_impl(id).await
    }

    async fn list_notices(
        &self,
        category: Option<NoticeCategory>,
        limit: u64,
    ) -> Result<Vec<Notice>> {
        self.list_notices_impl(category, limit).await
    }

    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>> {
        self.update_notice_impl(id, update).await
    }

    async fn delete_notice(&self, id: i64) -> Result<bool> {
        self.delete_notice_impl(id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments(&self, subject_id: Option<i64>) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(subject_id).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<DeleteOutcome> {
        self.delete_assignment_impl(id).await
    }

    async fn submit_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission_url: Option<String>,
    ) -> Result<SubmitOutcome> {
        self.submit_assignment_impl(assignment_id, student_id, submission_url)
            .await
    }

    async fn grade_submission(&self, grade: GradeSubmission) -> Result<GradeOutcome> {
        self.grade_submission_impl(grade).await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, student_id).await
    }

    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_for_assignment_impl(assignment_id)
            .await
    }

    async fn list_submissions_for_student(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_for_student_impl(student_id).await
    }

    // 申诉模块
    async fn create_grievance(
        &self,
        user_id: i64,
        grievance: CreateGrievanceRequest,
    ) -> Result<Grievance> {
        self.create_grievance_impl(user_id, grievance).await
    }

    async fn get_grievance_by_id(&self, id: i64) -> Result<Option<Grievance>> {
        self.get_grievance_by_id_impl(id).await
    }

    async fn list_grievances(&self, filter: GrievanceFilter) -> Result<Vec<Grievance>> {
        self.list_grievances_impl(filter).await
    }

    async fn transition_grievance(
        &self,
        id: i64,
        next: GrievanceStatus,
    ) -> Result<TransitionOutcome> {
        self.transition_grievance_impl(id, next).await
    }

    async fn delete_grievance(&self, id: i64) -> Result<bool> {
        self.delete_grievance_impl(id).await
    }

    // 学习资料模块
    async fn create_material(
        &self,
        subject_id: i64,
        uploaded_by: i64,
        material: CreateMaterialRequest,
    ) -> Result<StudyMaterial> {
        self.create_material_impl(subject_id, uploaded_by, material)
            .await
    }

    async fn list_materials(&self, subject_id: i64) -> Result<Vec<StudyMaterial>> {
        self.list_materials_impl(subject_id).await
    }

    // 课表模块
    async fn create_timetable_slot(&self, slot: NewTimetableSlot) -> Result<TimetableSlot> {
        self.create_timetable_slot_impl(slot).await
    }

    async fn list_timetable(&self, filter: TimetableFilter) -> Result<Vec<TimetableSlot>> {
        self.list_timetable_impl(filter).await
    }
}
