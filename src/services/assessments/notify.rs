//! 通过测评后的岗位申请推进
//!
//! 尽力而为的副作用：任何失败只记日志，不影响提交响应。

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::applications::entities::JobApplicationStatus;
use crate::storage::Storage;

/// 推进结果
#[derive(Debug, Clone, PartialEq)]
pub enum ShortlistOutcome {
    /// 已推进为 shortlisted
    Shortlisted,
    /// 已是 accepted，保持不动
    AlreadyAccepted,
    /// 该学生没有对应岗位的申请
    NoApplication,
    /// 存储失败
    Failed,
}

/// 测评通过后，把学生对关联岗位的申请推进为 shortlisted
///
/// 已 accepted 的申请不回退。
pub async fn auto_shortlist(
    storage: &Arc<dyn Storage>,
    job_id: i64,
    student_id: i64,
    assessment_id: i64,
) -> ShortlistOutcome {
    let application = match storage
        .get_job_application_by_job_and_student(job_id, student_id)
        .await
    {
        Ok(Some(app)) => app,
        Ok(None) => {
            info!(
                "No application for job {} by student {} after passing assessment {}",
                job_id, student_id, assessment_id
            );
            return ShortlistOutcome::NoApplication;
        }
        Err(e) => {
            warn!(
                "Failed to look up application for job {} by student {}: {}",
                job_id, student_id, e
            );
            return ShortlistOutcome::Failed;
        }
    };

    if application.status == JobApplicationStatus::Accepted {
        return ShortlistOutcome::AlreadyAccepted;
    }

    match storage
        .update_job_application_status(application.id, JobApplicationStatus::Shortlisted)
        .await
    {
        Ok(_) => {
            info!(
                "Application {} shortlisted after student {} passed assessment {}",
                application.id, student_id, assessment_id
            );
            ShortlistOutcome::Shortlisted
        }
        Err(e) => {
            warn!(
                "Failed to shortlist application {} for student {}: {}",
                application.id, student_id, e
            );
            ShortlistOutcome::Failed
        }
    }
}
