use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::models::assessments::responses::AssessmentSummary;
use crate::models::{ApiResponse, ErrorCode};

/// 列出当前可作答的测评
///
/// 返回摘要视图，不含题目内容。
pub async fn list_live_assessments(
    service: &AssessmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let now = chrono::Utc::now();

    match storage.list_live_assessments(now).await {
        Ok(assessments) => {
            let summaries: Vec<AssessmentSummary> =
                assessments.into_iter().map(AssessmentSummary::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(summaries, "获取开放测评成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询开放测评失败: {e}"),
            )),
        ),
    }
}
