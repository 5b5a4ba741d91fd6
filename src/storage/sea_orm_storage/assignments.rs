use super::SeaOrmStorage;
use crate::entity::assignment_submissions::{
    self, ActiveModel as SubmissionActiveModel, Entity as Submissions,
};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{PortalError, Result};
use crate::models::{
    DeleteOutcome,
    assignments::entities::{
        Assignment, GradeOutcome, GradeSubmission, NewAssignment, SubmissionStatus,
        SubmitOutcome, Submission,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, OnConflict},
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, assignment: NewAssignment) -> Result<Assignment> {
        let model = ActiveModel {
            title: Set(assignment.title),
            subject_id: Set(assignment.subject_id),
            description: Set(assignment.description),
            deadline: Set(assignment
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())),
            max_marks: Set(assignment.max_marks),
            created_by: Set(Some(assignment.created_by)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出作业，按截止日期排序，无截止日期的排在最后
    pub async fn list_assignments_impl(&self, subject_id: Option<i64>) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find();

        if let Some(subject_id) = subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        let assignments = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业列表失败: {e}")))?;

        let mut assignments: Vec<Assignment> =
            assignments.into_iter().map(|m| m.into_assignment()).collect();
        assignments.sort_by(|a, b| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        Ok(assignments)
    }

    /// 删除作业；已有提交记录时拒绝
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<DeleteOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开始事务失败: {e}")))?;

        let exists = Assignments::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询作业失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(DeleteOutcome::NotFound);
        }

        let submissions = Submissions::find()
            .filter(assignment_submissions::Column::AssignmentId.eq(id))
            .count(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计提交数量失败: {e}")))?;
        if submissions > 0 {
            return Ok(DeleteOutcome::InUse);
        }

        Assignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(DeleteOutcome::Deleted)
    }

    /// 提交作业
    ///
    /// 在一个事务中：先尝试插入（冲突时不做任何事），未插入则只更新尚未批改的记录。
    /// 两步都没有影响任何行，说明该提交已批改。
    pub async fn submit_assignment_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission_url: Option<String>,
    ) -> Result<SubmitOutcome> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开始事务失败: {e}")))?;

        let model = SubmissionActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            submission_url: Set(submission_url.clone()),
            marks: Set(None),
            max_marks: Set(None),
            remarks: Set(None),
            status: Set(SubmissionStatus::Submitted.to_string()),
            submitted_at: Set(now),
            graded_at: Set(None),
            graded_by: Set(None),
            ..Default::default()
        };

        let inserted = Submissions::insert(model)
            .on_conflict(
                OnConflict::columns([
                    assignment_submissions::Column::AssignmentId,
                    assignment_submissions::Column::StudentId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("提交作业失败: {e}")))?;

        if inserted == 0 {
            let updated = Submissions::update_many()
                .col_expr(
                    assignment_submissions::Column::SubmissionUrl,
                    Expr::value(submission_url),
                )
                .col_expr(
                    assignment_submissions::Column::SubmittedAt,
                    Expr::value(now),
                )
                .col_expr(
                    assignment_submissions::Column::Status,
                    Expr::value(SubmissionStatus::Submitted.to_string()),
                )
                .filter(assignment_submissions::Column::AssignmentId.eq(assignment_id))
                .filter(assignment_submissions::Column::StudentId.eq(student_id))
                .filter(
                    assignment_submissions::Column::Status
                        .ne(SubmissionStatus::Graded.to_string()),
                )
                .exec(&txn)
                .await
                .map_err(|e| PortalError::database_operation(format!("更新提交失败: {e}")))?;

            if updated.rows_affected == 0 {
                return Ok(SubmitOutcome::AlreadyGraded);
            }
        }

        let submission = find_submission(&txn, assignment_id, student_id)
            .await?
            .ok_or_else(|| PortalError::database_operation("提交写入后未找到记录"))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(SubmitOutcome::Submitted(submission))
    }

    /// 批改作业，只对已提交或已批改的记录生效
    pub async fn grade_submission_impl(&self, grade: GradeSubmission) -> Result<GradeOutcome> {
        let gradable = [
            SubmissionStatus::Submitted.to_string(),
            SubmissionStatus::Graded.to_string(),
        ];

        let updated = Submissions::update_many()
            .col_expr(assignment_submissions::Column::Marks, Expr::value(grade.marks))
            .col_expr(
                assignment_submissions::Column::MaxMarks,
                Expr::value(grade.max_marks),
            )
            .col_expr(
                assignment_submissions::Column::Remarks,
                Expr::value(grade.remarks),
            )
            .col_expr(
                assignment_submissions::Column::Status,
                Expr::value(SubmissionStatus::Graded.to_string()),
            )
            .col_expr(
                assignment_submissions::Column::GradedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .col_expr(
                assignment_submissions::Column::GradedBy,
                Expr::value(grade.graded_by),
            )
            .filter(assignment_submissions::Column::AssignmentId.eq(grade.assignment_id))
            .filter(assignment_submissions::Column::StudentId.eq(grade.student_id))
            .filter(assignment_submissions::Column::Status.is_in(gradable))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("批改作业失败: {e}")))?;

        if updated.rows_affected == 0 {
            return Ok(GradeOutcome::NotSubmitted);
        }

        let submission = find_submission(&self.db, grade.assignment_id, grade.student_id)
            .await?
            .ok_or_else(|| PortalError::database_operation("批改后未找到提交记录"))?;

        Ok(GradeOutcome::Graded(submission))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        find_submission(&self.db, assignment_id, student_id).await
    }

    /// 列出某作业的全部提交
    pub async fn list_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(assignment_submissions::Column::AssignmentId.eq(assignment_id))
            .order_by_asc(assignment_submissions::Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 列出某学生的全部提交
    pub async fn list_submissions_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(assignment_submissions::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }
}

async fn find_submission<C: ConnectionTrait>(
    conn: &C,
    assignment_id: i64,
    student_id: i64,
) -> Result<Option<Submission>> {
    let result = Submissions::find()
        .filter(assignment_submissions::Column::AssignmentId.eq(assignment_id))
        .filter(assignment_submissions::Column::StudentId.eq(student_id))
        .one(conn)
        .await
        .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

    Ok(result.map(|m| m.into_submission()))
}
