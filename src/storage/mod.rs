use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户方法（只读，数据由身份服务维护）
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// 测评定义方法
    // 创建测评
    async fn create_assessment(
        &self,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment>;
    // 通过ID获取测评
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    // 分页列出测评
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse>;
    // 列出当前可作答的测评（live 且处于时间窗口内）
    async fn list_live_assessments(&self, now: DateTime<Utc>) -> Result<Vec<Assessment>>;
    // 更新测评（部分更新）
    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    // 按归属原子删除测评（连带其作答台账），区分不存在与非本人
    async fn delete_assessment_owned(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<AssessmentDeleteOutcome>;

    /// 作答台账方法
    // 查找某学生在某测评下的台账记录
    async fn get_result_by_assessment_and_student(
        &self,
        assessment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssessmentResult>>;
    // 查找或创建进行中的台账记录（首次拉题时建立，固定开始时间）
    async fn find_or_create_in_progress_result(
        &self,
        assessment_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<AssessmentResult>;
    // 落账判分结果；重复提交（含并发竞态）折叠为 AlreadySubmitted
    async fn commit_result(
        &self,
        assessment_id: i64,
        student_id: i64,
        record: NewResultRecord,
    ) -> Result<ResultCommitOutcome>;
    // 列出某测评的全部已提交结果（按提交时间倒序）
    async fn list_results_for_assessment(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<AssessmentResult>>;

    /// 岗位申请方法（求职模块的协作接口，仅供通过后的副作用使用）
    // 查找某学生对某岗位的申请
    async fn get_job_application_by_job_and_student(
        &self,
        job_id: i64,
        student_id: i64,
    ) -> Result<Option<JobApplication>>;
    // 更新申请状态
    async fn update_job_application_status(
        &self,
        id: i64,
        status: JobApplicationStatus,
    ) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
