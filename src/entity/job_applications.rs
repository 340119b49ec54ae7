//! 岗位申请实体
//!
//! 归属求职模块，本服务只做查找与状态推进（测评通过后的副作用）。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub job_id: i64,
    pub student_id: i64,
    pub status: String,
    pub applied_at: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_application(self) -> crate::models::applications::entities::JobApplication {
        use crate::models::applications::entities::{JobApplication, JobApplicationStatus};
        use chrono::{DateTime, Utc};

        JobApplication {
            id: self.id,
            job_id: self.job_id,
            student_id: self.student_id,
            status: self.status.parse().unwrap_or(JobApplicationStatus::Pending),
            applied_at: DateTime::<Utc>::from_timestamp(self.applied_at, 0).unwrap_or_default(),
            notes: self.notes,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
