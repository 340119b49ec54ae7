use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::middlewares::RequireJWT;
use crate::models::assessments::responses::{AssessmentCreator, AssessmentDetail};
use crate::models::{ApiResponse, ErrorCode};

/// 获取测评详情（出题视角，含答案），仅创建者可见
pub async fn get_assessment(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

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

    // 详情包含答案，只有创建者可以查看
    if assessment.created_by != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己创建的测评",
        )));
    }

    let creator = match storage.get_user_by_id(assessment.created_by).await {
        Ok(Some(user)) => Some(AssessmentCreator {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
        }),
        _ => None,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssessmentDetail { assessment, creator },
        "获取测评详情成功",
    )))
}
