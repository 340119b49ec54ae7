use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AssessmentService;
use crate::models::assessments::entities::Availability;
use crate::models::assessments::responses::AssessmentForTaking;
use crate::models::{ApiResponse, ErrorCode};

/// 拉取作答内容
///
/// 通过可作答性门禁后剥离答案下发；首次拉取建立进行中的台账记录，
/// 之后重复拉取沿用同一 started_at，不会重置计时。
pub async fn take_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let now = chrono::Utc::now();

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

    // 可作答性门禁
    match assessment.availability(now) {
        Availability::Open => {}
        Availability::NotLive => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotLive,
                "测评当前未开放作答",
            )));
        }
        Availability::NotYetOpen(start) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotOpen,
                format!("测评将于 {} 开放", start.to_rfc3339()),
            )));
        }
        Availability::Closed(end) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::AssessmentClosed,
                format!("测评已于 {} 截止", end.to_rfc3339()),
            )));
        }
    }

    // 已提交过的不允许再次作答
    let existing = match storage
        .get_result_by_assessment_and_student(assessment_id, student_id)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作答记录失败: {e}"),
                )),
            );
        }
    };

    if let Some(result) = existing
        && result.is_submitted()
    {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error(
            ErrorCode::AlreadySubmitted,
            result,
            "已提交过该测评",
        )));
    }

    // 查找或建立进行中的台账记录，固定开始时间
    let in_progress = match storage
        .find_or_create_in_progress_result(assessment_id, student_id, now)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建作答记录失败: {e}"),
                )),
            );
        }
    };

    debug!(
        "Student {} taking assessment {} (started_at: {})",
        student_id, assessment_id, in_progress.started_at
    );

    let content = AssessmentForTaking::from_assessment(assessment, in_progress.started_at);
    Ok(HttpResponse::Ok().json(ApiResponse::success(content, "获取作答内容成功")))
}
