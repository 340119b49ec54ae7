//! 测评实体
//!
//! questions 列为 JSON 编码的有序题目数组（含答案），
//! 读取时反序列化为业务模型的 `Vec<Question>`。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_by: i64,
    pub job_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub duration: i64,
    pub passing_score: Option<f64>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::assessment_results::Entity")]
    Results,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::assessment_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use crate::models::assessments::entities::{Assessment, AssessmentStatus};
        use chrono::{DateTime, Utc};

        Assessment {
            id: self.id,
            title: self.title,
            description: self.description,
            duration: self.duration,
            passing_score: self.passing_score,
            start_date: self
                .start_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            end_date: self
                .end_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            difficulty: self.difficulty.and_then(|d| d.parse().ok()),
            category: self.category,
            instructions: self.instructions,
            questions: serde_json::from_str(&self.questions).unwrap_or_default(),
            job_id: self.job_id,
            created_by: self.created_by,
            status: self.status.parse().unwrap_or(AssessmentStatus::Draft),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
