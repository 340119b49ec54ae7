use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::AssessmentService;
use super::notify::auto_shortlist;
use super::scoring::score_submission;
use crate::models::assessments::requests::SubmitAssessmentRequest;
use crate::models::results::entities::{NewResultRecord, ResultCommitOutcome};
use crate::models::{ApiResponse, ErrorCode};

/// 提交测评
///
/// 判分后落账；重复提交（含并发竞态）返回 409，携带已存在的结果。
/// 通过且测评关联了岗位时，尽力推进该岗位的申请，失败不影响响应。
pub async fn submit_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
    student_id: i64,
    req: SubmitAssessmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assessment = match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "测评不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询测评失败: {e}"),
                )),
            );
        }
    };

    // 判分
    let outcome = score_submission(&assessment.questions, &req.answers, assessment.passing_score);

    let submitted_at = chrono::Utc::now();

    // 有效开始时间：进行中的台账记录优先，其次客户端声明，
    // 都没有则视为即时提交（用时为 0）
    let ledger_started_at = match storage
        .get_result_by_assessment_and_student(assessment_id, student_id)
        .await
    {
        Ok(existing) => existing.filter(|r| !r.is_submitted()).map(|r| r.started_at),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作答记录失败: {e}"),
                )),
            );
        }
    };
    let started_at = ledger_started_at
        .or(req.started_at)
        .unwrap_or(submitted_at);

    // 用时（分钟），不为负
    let time_taken = ((submitted_at - started_at).num_seconds().max(0) as f64 / 60.0).round() as i64;

    if time_taken > assessment.duration {
        warn!(
            "Student {} submitted assessment {} after {} minutes (duration: {})",
            student_id, assessment_id, time_taken, assessment.duration
        );
    }

    let record = NewResultRecord {
        answers: outcome.answers,
        score: outcome.score,
        total_points: outcome.total_points,
        percentage: outcome.percentage,
        passed: outcome.passed,
        started_at,
        submitted_at,
        time_taken,
        auto_submitted: req.auto_submitted,
    };

    let result = match storage.commit_result(assessment_id, student_id, record).await {
        Ok(ResultCommitOutcome::Committed(result)) => result,
        Ok(ResultCommitOutcome::AlreadySubmitted(existing)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error(
                ErrorCode::AlreadySubmitted,
                existing,
                "已提交过该测评",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("提交测评失败: {e}"),
                )),
            );
        }
    };

    info!(
        "Student {} submitted assessment {}: {}/{} ({}%), passed: {}",
        student_id,
        assessment_id,
        result.score,
        result.total_points,
        result.percentage,
        result.passed
    );

    // 通过且关联了岗位：尽力推进申请，失败只记日志
    if result.passed
        && let Some(job_id) = assessment.job_id
    {
        auto_shortlist(&storage, job_id, student_id, assessment_id).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "测评提交成功")))
}
