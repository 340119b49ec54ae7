//! 测评定义存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assessment_results::{
    Column as ResultColumn, Entity as AssessmentResults,
};
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::errors::{PlacementError, Result};
use crate::models::{
    PaginationInfo,
    assessments::{
        entities::{Assessment, AssessmentDeleteOutcome, AssessmentStatus},
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
        responses::{AssessmentCreator, AssessmentListItem, AssessmentListResponse},
    },
};
use crate::utils::escape_like_pattern;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建测评
    pub async fn create_assessment_impl(
        &self,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let questions = serde_json::to_string(&req.questions)?;

        let model = ActiveModel {
            created_by: Set(created_by),
            job_id: Set(req.job_id),
            title: Set(req.title),
            description: Set(req.description),
            duration: Set(req.duration),
            passing_score: Set(req.passing_score),
            start_date: Set(req.start_date.map(|dt| dt.timestamp())),
            end_date: Set(req.end_date.map(|dt| dt.timestamp())),
            difficulty: Set(req.difficulty.map(|d| d.to_string())),
            category: Set(req.category),
            instructions: Set(req.instructions),
            questions: Set(questions),
            status: Set(req.status.unwrap_or(AssessmentStatus::Draft).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("创建测评失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 通过 ID 获取测评
    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询测评失败: {e}")))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    /// 分页列出测评
    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assessments::find();

        // 创建者筛选（「我的测评」视图）
        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 搜索条件（按标题或分类搜索）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Category.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询测评总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询测评页数失败: {e}")))?;

        let assessments: Vec<Assessment> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询测评列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assessment())
            .collect();

        // 收集所有 created_by ID 并去重
        let creator_ids: Vec<i64> = assessments
            .iter()
            .map(|a| a.created_by)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        // 查询创建者信息
        let mut creator_map: HashMap<i64, AssessmentCreator> = HashMap::new();
        for creator_id in creator_ids {
            if let Ok(Some(user)) = self.get_user_by_id_impl(creator_id).await {
                creator_map.insert(
                    creator_id,
                    AssessmentCreator {
                        id: user.id,
                        username: user.username,
                        full_name: user.full_name,
                        email: user.email,
                    },
                );
            }
        }

        let items: Vec<AssessmentListItem> = assessments
            .into_iter()
            .map(|assessment| {
                let creator = creator_map.get(&assessment.created_by).cloned();
                AssessmentListItem { assessment, creator }
            })
            .collect();

        Ok(AssessmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出当前可作答的测评（live 且处于时间窗口内）
    pub async fn list_live_assessments_impl(&self, now: DateTime<Utc>) -> Result<Vec<Assessment>> {
        let ts = now.timestamp();

        let results = Assessments::find()
            .filter(Column::Status.eq(AssessmentStatus::LIVE))
            .filter(
                Condition::any()
                    .add(Column::StartDate.is_null())
                    .add(Column::StartDate.lte(ts)),
            )
            .filter(
                Condition::any()
                    .add(Column::EndDate.is_null())
                    .add(Column::EndDate.gte(ts)),
            )
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("查询开放测评失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assessment()).collect())
    }

    /// 更新测评（部分更新）
    pub async fn update_assessment_impl(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        // 先检查测评是否存在
        let existing = self.get_assessment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if let Some(duration) = update.duration {
            model.duration = Set(duration);
        }

        if let Some(passing_score) = update.passing_score {
            model.passing_score = Set(Some(passing_score));
        }

        if let Some(start_date) = update.start_date {
            model.start_date = Set(Some(start_date.timestamp()));
        }

        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date.timestamp()));
        }

        if let Some(difficulty) = update.difficulty {
            model.difficulty = Set(Some(difficulty.to_string()));
        }

        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }

        if let Some(instructions) = update.instructions {
            model.instructions = Set(Some(instructions));
        }

        if let Some(questions) = update.questions {
            model.questions = Set(serde_json::to_string(&questions)?);
        }

        if let Some(job_id) = update.job_id {
            model.job_id = Set(Some(job_id));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("更新测评失败: {e}")))?;

        self.get_assessment_by_id_impl(id).await
    }

    /// 按归属删除测评，连带删除其作答台账
    ///
    /// 删除条件带 created_by，避免「先查再删」之间的属主变化；
    /// 删空时再单查一次以区分「不存在」和「非本人」。
    pub async fn delete_assessment_owned_impl(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<AssessmentDeleteOutcome> {
        let result = Assessments::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::CreatedBy.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| PlacementError::database_operation(format!("删除测评失败: {e}")))?;

        if result.rows_affected == 0 {
            let exists = Assessments::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| PlacementError::database_operation(format!("查询测评失败: {e}")))?;

            return Ok(match exists {
                Some(_) => AssessmentDeleteOutcome::NotOwner,
                None => AssessmentDeleteOutcome::NotFound,
            });
        }

        // 连带清理作答台账
        AssessmentResults::delete_many()
            .filter(ResultColumn::AssessmentId.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                PlacementError::database_operation(format!("删除测评作答记录失败: {e}"))
            })?;

        Ok(AssessmentDeleteOutcome::Deleted)
    }
}
