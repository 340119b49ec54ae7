//! 预导入模块，方便使用

pub use super::assessment_results::{
    ActiveModel as AssessmentResultActiveModel, Entity as AssessmentResults,
    Model as AssessmentResultModel,
};
pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::job_applications::{
    ActiveModel as JobApplicationActiveModel, Entity as JobApplications,
    Model as JobApplicationModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
