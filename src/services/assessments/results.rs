use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::models::assessments::responses::{
    AssessmentResultsResponse, ResultStudent, ResultWithStudent, ResultsAssessmentInfo,
    ResultsStatistics,
};
use crate::models::{ApiResponse, ErrorCode};

/// 获取测评的全部结果与聚合统计，仅创建者可见
pub async fn get_assessment_results(
    service: &AssessmentService,
    request: &HttpRequest,
    assessment_id: i64,
    user_id: i64,
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

    // 权限检查：只有创建者可以查看结果
    if assessment.created_by != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己创建的测评结果",
        )));
    }

    let results = match storage.list_results_for_assessment(assessment_id).await {
        Ok(results) => results,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询测评结果失败: {e}"),
                )),
            );
        }
    };

    // 聚合统计
    let total_students = results.len() as i64;
    let passed_count = results.iter().filter(|r| r.passed).count() as i64;
    let failed_count = total_students - passed_count;
    let (average_score, average_time) = if total_students > 0 {
        let score_sum: f64 = results.iter().map(|r| r.percentage).sum();
        let time_sum: f64 = results.iter().map(|r| r.time_taken as f64).sum();
        (
            (score_sum / total_students as f64 * 100.0).round() / 100.0,
            (time_sum / total_students as f64 * 10.0).round() / 10.0,
        )
    } else {
        (0.0, 0.0)
    };

    // 批量查询学生信息
    let student_ids: Vec<i64> = results
        .iter()
        .map(|r| r.student_id)
        .collect::<std::collections::HashSet<_>>()
        .into_iter()
        .collect();

    let mut student_map: HashMap<i64, ResultStudent> = HashMap::new();
    for student_id in student_ids {
        if let Ok(Some(user)) = storage.get_user_by_id(student_id).await {
            student_map.insert(
                student_id,
                ResultStudent {
                    id: user.id,
                    username: user.username,
                    full_name: user.full_name,
                    email: user.email,
                },
            );
        }
    }

    let results_with_students: Vec<ResultWithStudent> = results
        .into_iter()
        .map(|result| {
            let student = student_map.get(&result.student_id).cloned();
            ResultWithStudent { result, student }
        })
        .collect();

    let response = AssessmentResultsResponse {
        assessment: ResultsAssessmentInfo {
            id: assessment.id,
            title: assessment.title,
            description: assessment.description,
            duration: assessment.duration,
            passing_score: assessment.passing_score,
            total_questions: assessment.questions.len() as i64,
            questions: assessment.questions,
        },
        results: results_with_students,
        statistics: ResultsStatistics {
            total_students,
            passed_count,
            failed_count,
            average_score,
            average_time,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取测评结果成功")))
}
