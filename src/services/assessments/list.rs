use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::models::assessments::requests::{AssessmentListParams, AssessmentListQuery};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_assessments(
    service: &AssessmentService,
    request: &HttpRequest,
    params: AssessmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = AssessmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        status: params.status,
        search: params.search,
        created_by: None,
    };

    match storage.list_assessments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取测评列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询测评列表失败: {e}"),
            )),
        ),
    }
}
