//! 作答台账存储操作
//!
//! (assessment_id, student_id) 唯一索引是防止重复落账的最终仲裁，
//! 所有「先查后写」路径的竞态最终都由它拦下并折叠为 AlreadySubmitted。

use super::SeaOrmStorage;
use crate::entity::assessment_results::{ActiveModel, Column, Entity as AssessmentResults};
use crate::errors::{PlacementError, Result};
use crate::models::results::entities::{AssessmentResult, NewResultRecord, ResultCommitOutcome};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 查找某学生在某测评下的台账记录
    pub async fn get_result_by_assessment_and_student_impl(
        &self,
        assessment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssessmentResult>> {
        let result = AssessmentResults::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询作答记录失败: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }

    /// 查找或创建进行中的台账记录
    ///
    /// 首次拉题时建立，固定 started_at；重复拉题返回同一条记录，
    /// 并发创建靠唯一索引兜底后重查。
    pub async fn find_or_create_in_progress_result_impl(
        &self,
        assessment_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<AssessmentResult> {
        if let Some(existing) = self
            .get_result_by_assessment_and_student_impl(assessment_id, student_id)
            .await?
        {
            return Ok(existing);
        }

        let ts = now.timestamp();

        let model = ActiveModel {
            assessment_id: Set(assessment_id),
            student_id: Set(student_id),
            answers: Set("[]".to_string()),
            score: Set(0),
            total_points: Set(0),
            percentage: Set(0.0),
            passed: Set(false),
            started_at: Set(ts),
            submitted_at: Set(None),
            time_taken: Set(0),
            auto_submitted: Set(false),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok(inserted.into_result()),
            // 并发拉题：另一次请求先建了记录，重查沿用它
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => self
                .get_result_by_assessment_and_student_impl(assessment_id, student_id)
                .await?
                .ok_or_else(|| {
                    PlacementError::database_operation("作答记录创建冲突后查询不到记录")
                }),
            Err(e) => Err(PlacementError::database_operation(format!(
                "创建作答记录失败: {e}"
            ))),
        }
    }

    /// 落账判分结果
    ///
    /// 三步：
    /// 1. 条件更新进行中的记录（submitted_at IS NULL），命中即落账成功；
    /// 2. 未命中且已有终态记录，折叠为 AlreadySubmitted；
    /// 3. 无记录则直接插入终态，唯一索引冲突同样折叠为 AlreadySubmitted。
    pub async fn commit_result_impl(
        &self,
        assessment_id: i64,
        student_id: i64,
        record: NewResultRecord,
    ) -> Result<ResultCommitOutcome> {
        let now = chrono::Utc::now().timestamp();
        let answers = serde_json::to_string(&record.answers)?;

        let updated = AssessmentResults::update_many()
            .col_expr(Column::Answers, Expr::value(answers.clone()))
            .col_expr(Column::Score, Expr::value(record.score))
            .col_expr(Column::TotalPoints, Expr::value(record.total_points))
            .col_expr(Column::Percentage, Expr::value(record.percentage))
            .col_expr(Column::Passed, Expr::value(record.passed))
            .col_expr(Column::StartedAt, Expr::value(record.started_at.timestamp()))
            .col_expr(
                Column::SubmittedAt,
                Expr::value(Some(record.submitted_at.timestamp())),
            )
            .col_expr(Column::TimeTaken, Expr::value(record.time_taken))
            .col_expr(Column::AutoSubmitted, Expr::value(record.auto_submitted))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubmittedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("落账作答结果失败: {e}")))?;

        if updated.rows_affected > 0 {
            return self
                .get_result_by_assessment_and_student_impl(assessment_id, student_id)
                .await?
                .map(ResultCommitOutcome::Committed)
                .ok_or_else(|| PlacementError::database_operation("落账后查询不到作答记录"));
        }

        // 条件更新未命中：要么已有终态记录，要么还没有任何记录
        if let Some(existing) = self
            .get_result_by_assessment_and_student_impl(assessment_id, student_id)
            .await?
        {
            return Ok(ResultCommitOutcome::AlreadySubmitted(existing));
        }

        let model = ActiveModel {
            assessment_id: Set(assessment_id),
            student_id: Set(student_id),
            answers: Set(answers),
            score: Set(record.score),
            total_points: Set(record.total_points),
            percentage: Set(record.percentage),
            passed: Set(record.passed),
            started_at: Set(record.started_at.timestamp()),
            submitted_at: Set(Some(record.submitted_at.timestamp())),
            time_taken: Set(record.time_taken),
            auto_submitted: Set(record.auto_submitted),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok(ResultCommitOutcome::Committed(inserted.into_result())),
            // 并发提交：另一次请求抢先落账，以它为准
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => self
                .get_result_by_assessment_and_student_impl(assessment_id, student_id)
                .await?
                .map(ResultCommitOutcome::AlreadySubmitted)
                .ok_or_else(|| {
                    PlacementError::database_operation("落账冲突后查询不到作答记录")
                }),
            Err(e) => Err(PlacementError::database_operation(format!(
                "落账作答结果失败: {e}"
            ))),
        }
    }

    /// 列出某测评的全部已提交结果（按提交时间倒序）
    pub async fn list_results_for_assessment_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<AssessmentResult>> {
        let results = AssessmentResults::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::SubmittedAt.is_not_null())
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询作答结果失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_result()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{assessments, users};
    use crate::models::results::entities::Answer;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, PaginatorTrait, Set};

    const ASSESSMENT_ID: i64 = 1;
    const STUDENT_ID: i64 = 2;

    async fn storage_with_seed() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let ts = Utc::now().timestamp();

        // 外键依赖：出题老师、考生、一份测评
        for (id, username, role) in [(10, "tpo", "tpo"), (STUDENT_ID, "student", "student")] {
            users::ActiveModel {
                id: Set(id),
                username: Set(username.to_string()),
                email: Set(format!("{username}@example.com")),
                full_name: Set(None),
                role: Set(role.to_string()),
                status: Set("active".to_string()),
                created_at: Set(ts),
                updated_at: Set(ts),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        assessments::ActiveModel {
            id: Set(ASSESSMENT_ID),
            created_by: Set(10),
            job_id: Set(None),
            title: Set("Java 基础测评".to_string()),
            description: Set("test".to_string()),
            duration: Set(30),
            passing_score: Set(Some(60.0)),
            start_date: Set(None),
            end_date: Set(None),
            difficulty: Set(None),
            category: Set(None),
            instructions: Set(None),
            questions: Set("[]".to_string()),
            status: Set("live".to_string()),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&db)
        .await
        .unwrap();

        SeaOrmStorage { db }
    }

    fn record(score: i64, started_at: chrono::DateTime<Utc>) -> NewResultRecord {
        NewResultRecord {
            answers: vec![Answer {
                question_index: 0,
                selected_answer: Some(1),
                is_correct: score > 0,
                points_earned: score,
            }],
            score,
            total_points: 6,
            percentage: score as f64 / 6.0 * 100.0,
            passed: score >= 4,
            started_at,
            submitted_at: Utc::now(),
            time_taken: 5,
            auto_submitted: false,
        }
    }

    async fn ledger_rows(storage: &SeaOrmStorage) -> u64 {
        AssessmentResults::find()
            .filter(Column::AssessmentId.eq(ASSESSMENT_ID))
            .filter(Column::StudentId.eq(STUDENT_ID))
            .count(&storage.db)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_commit_keeps_first_row() {
        let storage = storage_with_seed().await;
        let started_at = Utc::now();

        let first = storage
            .commit_result_impl(ASSESSMENT_ID, STUDENT_ID, record(6, started_at))
            .await
            .unwrap();
        let committed = match first {
            ResultCommitOutcome::Committed(result) => result,
            ResultCommitOutcome::AlreadySubmitted(_) => panic!("首次落账不应冲突"),
        };
        assert_eq!(committed.score, 6);

        // 重复落账必须折叠为冲突，且已有记录保持原样
        let second = storage
            .commit_result_impl(ASSESSMENT_ID, STUDENT_ID, record(0, started_at))
            .await
            .unwrap();
        match second {
            ResultCommitOutcome::AlreadySubmitted(existing) => {
                assert_eq!(existing.id, committed.id);
                assert_eq!(existing.score, 6);
                assert!(existing.passed);
            }
            ResultCommitOutcome::Committed(_) => panic!("重复落账不应成功"),
        }

        assert_eq!(ledger_rows(&storage).await, 1);
    }

    #[tokio::test]
    async fn test_in_progress_row_pins_started_at() {
        let storage = storage_with_seed().await;

        let first_pull = Utc::now() - chrono::Duration::minutes(10);
        let in_progress = storage
            .find_or_create_in_progress_result_impl(ASSESSMENT_ID, STUDENT_ID, first_pull)
            .await
            .unwrap();
        assert!(!in_progress.is_submitted());

        // 重复拉题沿用同一条记录，不重置开始时间
        let again = storage
            .find_or_create_in_progress_result_impl(ASSESSMENT_ID, STUDENT_ID, Utc::now())
            .await
            .unwrap();
        assert_eq!(again.id, in_progress.id);
        assert_eq!(again.started_at, in_progress.started_at);

        // 落账在原记录上就地升级为终态
        let outcome = storage
            .commit_result_impl(ASSESSMENT_ID, STUDENT_ID, record(6, in_progress.started_at))
            .await
            .unwrap();
        match outcome {
            ResultCommitOutcome::Committed(result) => {
                assert_eq!(result.id, in_progress.id);
                assert_eq!(result.started_at, in_progress.started_at);
                assert!(result.is_submitted());
            }
            ResultCommitOutcome::AlreadySubmitted(_) => panic!("进行中的记录应当允许落账"),
        }

        assert_eq!(ledger_rows(&storage).await, 1);
    }
}
