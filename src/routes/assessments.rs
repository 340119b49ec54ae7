use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assessments::requests::{
    AssessmentListParams, CreateAssessmentRequest, SubmitAssessmentRequest,
    UpdateAssessmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssessmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

// 创建测评
pub async fn create_assessment(
    req: HttpRequest,
    body: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .create_assessment(&req, user_id, body.into_inner())
        .await
}

// 列出测评
pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(&req, query.into_inner())
        .await
}

// 列出我创建的测评
pub async fn list_my_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_my_assessments(&req, query.into_inner())
        .await
}

// 列出当前可作答的测评
pub async fn list_live_assessments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.list_live_assessments(&req).await
}

// 获取测评详情（出题视角）
pub async fn get_assessment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assessment(&req, path.0).await
}

// 更新测评
pub async fn update_assessment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .update_assessment(&req, path.0, body.into_inner(), user_id)
        .await
}

// 删除测评
pub async fn delete_assessment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .delete_assessment(&req, path.0, user_id)
        .await
}

// 拉取作答内容
pub async fn take_assessment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let student_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .take_assessment(&req, path.0, student_id)
        .await
}

// 提交测评
pub async fn submit_assessment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    let student_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .submit_assessment(&req, path.0, student_id, body.into_inner())
        .await
}

// 获取测评结果
pub async fn get_assessment_results(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ASSESSMENT_SERVICE
        .get_assessment_results(&req, path.0, user_id)
        .await
}

// 配置路由
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出测评 - 仅 TPO（列表含完整定义）
                    .route(
                        web::get()
                            .to(list_assessments)
                            .wrap(middlewares::RequireRole::new_any(UserRole::tpo_roles())),
                    )
                    // 创建测评 - 仅 TPO
                    .route(
                        web::post()
                            .to(create_assessment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::tpo_roles())),
                    ),
            )
            // 我创建的测评 - 仅 TPO
            .service(
                web::resource("/my")
                    .route(web::get().to(list_my_assessments))
                    .wrap(middlewares::RequireRole::new_any(UserRole::tpo_roles())),
            )
            // 当前可作答的测评 - 所有登录用户可访问
            .service(web::resource("/live").route(web::get().to(list_live_assessments)))
            .service(
                web::resource("/{id}")
                    // 获取测评详情 - 业务层校验创建者
                    .route(web::get().to(get_assessment))
                    // 更新测评 - 仅 TPO，业务层校验创建者
                    .route(
                        web::put()
                            .to(update_assessment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::tpo_roles())),
                    )
                    // 删除测评 - 仅 TPO，业务层校验创建者
                    .route(
                        web::delete()
                            .to(delete_assessment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::tpo_roles())),
                    ),
            )
            // 拉取作答内容 - 所有登录用户可访问
            .service(web::resource("/{id}/take").route(web::get().to(take_assessment)))
            // 提交测评 - 所有登录用户可访问，带提交频率限制
            .service(
                web::resource("/{id}/submit").route(
                    web::post()
                        .to(submit_assessment)
                        .wrap(middlewares::RateLimit::submit()),
                ),
            )
            // 测评结果 - 业务层校验创建者
            .service(
                web::resource("/{id}/results").route(web::get().to(get_assessment_results)),
            ),
    );
}
