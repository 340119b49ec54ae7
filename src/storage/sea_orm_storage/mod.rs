//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessment_results;
mod assessments;
mod job_applications;
mod users;

use crate::config::AppConfig;
use crate::errors::{PlacementError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PlacementError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PlacementError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PlacementError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PlacementError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PlacementError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use chrono::{DateTime, Utc};

use crate::models::{
    applications::entities::{JobApplication, JobApplicationStatus},
    assessments::{
        entities::{Assessment, AssessmentDeleteOutcome},
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
        responses::AssessmentListResponse,
    },
    results::entities::{AssessmentResult, NewResultRecord, ResultCommitOutcome},
    users::entities::User,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // 测评模块
    async fn create_assessment(
        &self,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment> {
        self.create_assessment_impl(created_by, req).await
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(id).await
    }

    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        self.list_assessments_with_pagination_impl(query).await
    }

    async fn list_live_assessments(&self, now: DateTime<Utc>) -> Result<Vec<Assessment>> {
        self.list_live_assessments_impl(now).await
    }

    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        self.update_assessment_impl(id, update).await
    }

    async fn delete_assessment_owned(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<AssessmentDeleteOutcome> {
        self.delete_assessment_owned_impl(id, user_id).await
    }

    // 作答台账模块
    async fn get_result_by_assessment_and_student(
        &self,
        assessment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssessmentResult>> {
        self.get_result_by_assessment_and_student_impl(assessment_id, student_id)
            .await
    }

    async fn find_or_create_in_progress_result(
        &self,
        assessment_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<AssessmentResult> {
        self.find_or_create_in_progress_result_impl(assessment_id, student_id, now)
            .await
    }

    async fn commit_result(
        &self,
        assessment_id: i64,
        student_id: i64,
        record: NewResultRecord,
    ) -> Result<ResultCommitOutcome> {
        self.commit_result_impl(assessment_id, student_id, record)
            .await
    }

    async fn list_results_for_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<AssessmentResult>> {
        self.list_results_for_assessment_impl(assessment_id).await
    }

    // 岗位申请模块
    async fn get_job_application_by_job_and_student(
        &self,
        job_id: i64,
        student_id: i64,
    ) -> Result<Option<JobApplication>> {
        self.get_job_application_by_job_and_student_impl(job_id, student_id)
            .await
    }

    async fn update_job_application_status(
        &self,
        id: i64,
        status: JobApplicationStatus,
    ) -> Result<bool> {
        self.update_job_application_status_impl(id, status).await
    }
}
