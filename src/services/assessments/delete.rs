use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::models::assessments::entities::AssessmentDeleteOutcome;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 删除条件带归属，存储层负责区分「不存在」与「非本人」
    match storage.delete_assessment_owned(assessment_id, user_id).await {
        Ok(AssessmentDeleteOutcome::Deleted) => {
            info!("Assessment {} deleted by user {}", assessment_id, user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("测评已删除")))
        }
        Ok(AssessmentDeleteOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::AssessmentNotFound, "测评不存在"),
        )),
        Ok(AssessmentDeleteOutcome::NotOwner) => Ok(HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::Forbidden, "只能删除自己创建的测评"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除测评失败: {e}"),
            )),
        ),
    }
}
