//! 岗位申请存储操作（求职模块的协作接口）

use super::SeaOrmStorage;
use crate::entity::job_applications::{Column, Entity as JobApplications};
use crate::errors::{PlacementError, Result};
use crate::models::applications::entities::{JobApplication, JobApplicationStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 查找某学生对某岗位的申请
    pub async fn get_job_application_by_job_and_student_impl(
        &self,
        job_id: i64,
        student_id: i64,
    ) -> Result<Option<JobApplication>> {
        let result = JobApplications::find()
            .filter(Column::JobId.eq(job_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询岗位申请失败: {e}")))?;

        Ok(result.map(|m| m.into_application()))
    }

    /// 更新申请状态
    pub async fn update_job_application_status_impl(
        &self,
        id: i64,
        status: JobApplicationStatus,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = JobApplications::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("更新申请状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
