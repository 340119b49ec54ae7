use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::models::assessments::requests::UpdateAssessmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
    req: UpdateAssessmentRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    // 只校验出现在补丁中的字段
    if let Err(message) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            message,
        )));
    }

    let storage = service.get_storage(request);

    let existing = match storage.get_assessment_by_id(assessment_id).await {
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

    // 权限检查：只能更新自己创建的测评
    if existing.created_by != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能更新自己创建的测评",
        )));
    }

    match storage.update_assessment(assessment_id, req).await {
        Ok(Some(assessment)) => {
            info!("Assessment {} updated by user {}", assessment_id, user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "测评更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "测评不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新测评失败: {e}"),
            )),
        ),
    }
}
