use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assessments::entities::{
    Assessment, AssessmentStatus, Difficulty, QuestionType,
};
use crate::models::common::pagination::PaginationInfo;
use crate::models::results::entities::AssessmentResult;

/// 创建者信息（列表/详情中随测评一起返回）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentCreator {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
}

/// 列表项：测评 + 创建者
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assessment: Assessment,
    pub creator: Option<AssessmentCreator>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<AssessmentListItem>,
    pub pagination: PaginationInfo,
}

/// 测评详情（出题视角，含答案）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assessment: Assessment,
    pub creator: Option<AssessmentCreator>,
}

/// 学生可见的测评摘要（不含题目内容）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration: i64,
    pub passing_score: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub status: AssessmentStatus,
    pub question_count: i64,
    pub total_points: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Assessment> for AssessmentSummary {
    fn from(a: Assessment) -> Self {
        let total_points = a.total_points();
        Self {
            id: a.id,
            title: a.title,
            description: a.description,
            duration: a.duration,
            passing_score: a.passing_score,
            start_date: a.start_date,
            end_date: a.end_date,
            difficulty: a.difficulty,
            category: a.category,
            status: a.status,
            question_count: a.questions.len() as i64,
            total_points,
            created_at: a.created_at,
        }
    }
}

/// 作答视角的题目：正确答案已剥离
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct QuestionForTaking {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub points: i64,
}

/// 作答视角的测评内容
///
/// started_at 为有效开始时间：已有进行中台账记录时沿用其时间，
/// 否则为本次请求的时间。重复拉取不会重置计时。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentForTaking {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration: i64,
    pub passing_score: Option<f64>,
    pub instructions: Option<String>,
    pub questions: Vec<QuestionForTaking>,
    pub started_at: DateTime<Utc>,
}

impl AssessmentForTaking {
    /// 从完整定义构造，剥离每道题的 correct_answer
    pub fn from_assessment(assessment: Assessment, started_at: DateTime<Utc>) -> Self {
        Self {
            id: assessment.id,
            title: assessment.title,
            description: assessment.description,
            duration: assessment.duration,
            passing_score: assessment.passing_score,
            instructions: assessment.instructions,
            questions: assessment
                .questions
                .into_iter()
                .map(|q| QuestionForTaking {
                    question: q.question,
                    question_type: q.question_type,
                    options: q.options,
                    points: q.points,
                })
                .collect(),
            started_at,
        }
    }
}

/// 结果列表中的学生信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ResultStudent {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
}

/// 单条结果 + 学生信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ResultWithStudent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub result: AssessmentResult,
    pub student: Option<ResultStudent>,
}

/// 结果页的测评信息（含题目，供逐题查看答案详情）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ResultsAssessmentInfo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration: i64,
    pub passing_score: Option<f64>,
    pub total_questions: i64,
    pub questions: Vec<crate::models::assessments::entities::Question>,
}

/// 聚合统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ResultsStatistics {
    pub total_students: i64,
    pub passed_count: i64,
    pub failed_count: i64,
    /// 平均百分比得分（保留两位小数）
    pub average_score: f64,
    /// 平均用时（分钟，保留一位小数）
    pub average_time: f64,
}

/// 测评结果响应（仅创建者可见）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentResultsResponse {
    pub assessment: ResultsAssessmentInfo,
    pub results: Vec<ResultWithStudent>,
    pub statistics: ResultsStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::{Question, QuestionType};

    fn assessment_with_answer_key() -> Assessment {
        Assessment {
            id: 7,
            title: "Java 基础测评".to_string(),
            description: "test".to_string(),
            duration: 30,
            passing_score: Some(60.0),
            start_date: None,
            end_date: None,
            difficulty: None,
            category: None,
            instructions: Some("作答须知".to_string()),
            questions: vec![
                Question {
                    question: "1 + 1 = ?".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    options: vec!["1".to_string(), "2".to_string()],
                    correct_answer: Some(1),
                    points: 2,
                },
                Question {
                    question: "地球是圆的".to_string(),
                    question_type: QuestionType::TrueFalse,
                    options: vec!["对".to_string(), "错".to_string()],
                    correct_answer: Some(0),
                    points: 1,
                },
            ],
            job_id: None,
            created_by: 10,
            status: crate::models::assessments::entities::AssessmentStatus::Live,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_taking_view_strips_answer_key() {
        let started_at = Utc::now();
        let content =
            AssessmentForTaking::from_assessment(assessment_with_answer_key(), started_at);

        let json = serde_json::to_value(&content).unwrap();
        let serialized = json.to_string();

        // 下发给考生的内容不允许出现任何答案字段
        assert!(!serialized.contains("correct_answer"));

        // 题目本身要完整下发
        let questions = json["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0]["question"], "1 + 1 = ?");
        assert_eq!(questions[0]["points"], 2);
        assert_eq!(questions[1]["type"], "true-false");
        assert!(json["started_at"].is_string());
    }
}
