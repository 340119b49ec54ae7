//! 测评结果实体（作答台账）
//!
//! (assessment_id, student_id) 上有唯一索引，是防止重复提交的
//! 最终仲裁：并发插入时数据库层面必然只有一条成功。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub score: i64,
    pub total_points: i64,
    pub percentage: f64,
    pub passed: bool,
    pub started_at: i64,
    pub submitted_at: Option<i64>,
    pub time_taken: i64,
    pub auto_submitted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_result(self) -> crate::models::results::entities::AssessmentResult {
        use crate::models::results::entities::AssessmentResult;
        use chrono::{DateTime, Utc};

        AssessmentResult {
            id: self.id,
            assessment_id: self.assessment_id,
            student_id: self.student_id,
            answers: serde_json::from_str(&self.answers).unwrap_or_default(),
            score: self.score,
            total_points: self.total_points,
            percentage: self.percentage,
            passed: self.passed,
            started_at: DateTime::<Utc>::from_timestamp(self.started_at, 0).unwrap_or_default(),
            submitted_at: self
                .submitted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            time_taken: self.time_taken,
            auto_submitted: self.auto_submitted,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
