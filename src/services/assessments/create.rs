use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::models::assessments::requests::CreateAssessmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    created_by: i64,
    req: CreateAssessmentRequest,
) -> ActixResult<HttpResponse> {
    // 校验请求参数
    if let Err(message) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            message,
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_assessment(created_by, req).await {
        Ok(assessment) => {
            info!(
                "Assessment {} created by user {}",
                assessment.id, created_by
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assessment, "测评创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建测评失败: {e}"),
            )),
        ),
    }
}
