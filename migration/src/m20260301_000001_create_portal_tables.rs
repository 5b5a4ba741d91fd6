use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Department).string().null())
                    .col(ColumnDef::new(Users::Semester).integer().null())
                    .col(ColumnDef::new(Users::EnrollmentNo).string().null())
                    .col(ColumnDef::new(Users::Avatar).string().null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Department).string().null())
                    .col(ColumnDef::new(Subjects::Semester).integer().null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 考勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::Date).string_len(10).not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::MarkedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::MarkedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 成绩表
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Marks::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::ExamType).string().not_null())
                    .col(ColumnDef::new(Marks::Marks).integer().not_null())
                    .col(ColumnDef::new(Marks::MaxMarks).integer().not_null())
                    .col(ColumnDef::new(Marks::Semester).integer().null())
                    .col(ColumnDef::new(Marks::EnteredBy).big_integer().null())
                    .col(ColumnDef::new(Marks::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::EnteredBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 公告表
        manager
            .create_table(
                Table::create()
                    .table(Notices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notices::Title).string().not_null())
                    .col(ColumnDef::new(Notices::Content).text().not_null())
                    .col(ColumnDef::new(Notices::Category).string().not_null())
                    .col(
                        ColumnDef::new(Notices::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notices::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Notices::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notices::Table, Notices::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::Deadline).string_len(10).null())
                    .col(
                        ColumnDef::new(Assignments::MaxMarks)
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(ColumnDef::new(Assignments::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业提交表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmissionUrl)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmissions::Marks).integer().null())
                    .col(
                        ColumnDef::new(AssignmentSubmissions::MaxMarks)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmissions::Remarks).text().null())
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedBy)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::AssignmentId,
                            )
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::StudentId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::GradedBy,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 申诉表
        manager
            .create_table(
                Table::create()
                    .table(Grievances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grievances::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grievances::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Grievances::Category).string().not_null())
                    .col(ColumnDef::new(Grievances::Description).text().not_null())
                    .col(ColumnDef::new(Grievances::Status).string().not_null())
                    .col(
                        ColumnDef::new(Grievances::IsAnonymous)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Grievances::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Grievances::ResolvedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grievances::Table, Grievances::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 学习资料表
        manager
            .create_table(
                Table::create()
                    .table(StudyMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudyMaterials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudyMaterials::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudyMaterials::UnitTitle).string().not_null())
                    .col(
                        ColumnDef::new(StudyMaterials::ResourceName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudyMaterials::ResourceType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudyMaterials::ResourceUrl).string().null())
                    .col(
                        ColumnDef::new(StudyMaterials::UploadedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudyMaterials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudyMaterials::Table, StudyMaterials::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudyMaterials::Table, StudyMaterials::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 课表
        manager
            .create_table(
                Table::create()
                    .table(Timetable::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Timetable::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Timetable::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Timetable::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Timetable::Day).string().not_null())
                    .col(ColumnDef::new(Timetable::StartTime).string_len(5).not_null())
                    .col(ColumnDef::new(Timetable::EndTime).string_len(5).not_null())
                    .col(ColumnDef::new(Timetable::Room).string().null())
                    .col(ColumnDef::new(Timetable::Batch).string().null())
                    .col(ColumnDef::new(Timetable::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Timetable::Table, Timetable::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Timetable::Table, Timetable::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引：同一学生同一课程同一天只有一条考勤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_student_subject_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::SubjectId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 唯一索引：每个学生每份作业只有一条提交
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_submissions_assignment_student")
                    .table(AssignmentSubmissions::Table)
                    .col(AssignmentSubmissions::AssignmentId)
                    .col(AssignmentSubmissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_marks_student_id")
                    .table(Marks::Table)
                    .col(Marks::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grievances_user_id")
                    .table(Grievances::Table)
                    .col(Grievances::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_timetable_teacher_id")
                    .table(Timetable::Table)
                    .col(Timetable::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Timetable::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudyMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grievances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Department,
    Semester,
    EnrollmentNo,
    Avatar,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Code,
    Department,
    Semester,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    SubjectId,
    Date,
    Status,
    MarkedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Marks {
    #[sea_orm(iden = "marks")]
    Table,
    Id,
    StudentId,
    SubjectId,
    ExamType,
    Marks,
    MaxMarks,
    Semester,
    EnteredBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notices {
    #[sea_orm(iden = "notices")]
    Table,
    Id,
    Title,
    Content,
    Category,
    IsPinned,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    Title,
    SubjectId,
    Description,
    Deadline,
    MaxMarks,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssignmentSubmissions {
    #[sea_orm(iden = "assignment_submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    SubmissionUrl,
    Marks,
    MaxMarks,
    Remarks,
    Status,
    SubmittedAt,
    GradedAt,
    GradedBy,
}

#[derive(DeriveIden)]
enum Grievances {
    #[sea_orm(iden = "grievances")]
    Table,
    Id,
    UserId,
    Category,
    Description,
    Status,
    IsAnonymous,
    CreatedAt,
    ResolvedAt,
}

#[derive(DeriveIden)]
enum StudyMaterials {
    #[sea_orm(iden = "study_materials")]
    Table,
    Id,
    SubjectId,
    UnitTitle,
    ResourceName,
    ResourceType,
    ResourceUrl,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Timetable {
    #[sea_orm(iden = "timetable")]
    Table,
    Id,
    SubjectId,
    TeacherId,
    Day,
    StartTime,
    EndTime,
    Room,
    Batch,
    CreatedAt,
}
