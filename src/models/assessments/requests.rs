use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::assessments::entities::{AssessmentStatus, Difficulty, Question};
use crate::models::common::pagination::PaginationQuery;

/// 创建测评请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub description: String,
    pub duration: i64, // 分钟
    pub passing_score: Option<f64>,
    pub start_date: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub end_date: Option<DateTime<Utc>>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub instructions: Option<String>,
    pub questions: Vec<Question>,
    pub job_id: Option<i64>,
    pub status: Option<AssessmentStatus>,
}

/// 更新测评请求（部分更新，只校验出现的字段）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub passing_score: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub instructions: Option<String>,
    pub questions: Option<Vec<Question>>,
    pub job_id: Option<i64>,
    pub status: Option<AssessmentStatus>,
}

/// 测评列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<AssessmentStatus>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<AssessmentStatus>,
    pub search: Option<String>,
    pub created_by: Option<i64>,
}

/// 提交的单题答案
///
/// selected_answer 为空或某题下标缺失都按未作答处理，不拒绝。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SubmittedAnswer {
    pub question_index: i32,
    pub selected_answer: Option<i32>,
}

/// 提交测评请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SubmitAssessmentRequest {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    /// 客户端观察到的开始时间；服务端存在进行中的台账记录时以台账为准
    pub started_at: Option<DateTime<Utc>>,
    /// 是否为倒计时耗尽的自动提交（客户端声明，服务端信任并记录）
    #[serde(default)]
    pub auto_submitted: bool,
}

/// 校验题目列表：非空、每题至少 2 个选项、
/// correct_answer 下标有效、分值至少为 1
fn validate_questions(questions: &[Question]) -> Result<(), String> {
    if questions.is_empty() {
        return Err("测评至少需要一道题目".to_string());
    }
    for (i, q) in questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(format!("第 {} 题缺少题干", i + 1));
        }
        if q.options.len() < 2 {
            return Err(format!("第 {} 题至少需要 2 个选项", i + 1));
        }
        if let Some(answer) = q.correct_answer
            && (answer < 0 || answer as usize >= q.options.len())
        {
            return Err(format!("第 {} 题的正确答案下标超出选项范围", i + 1));
        }
        if q.points < 1 {
            return Err(format!("第 {} 题的分值至少为 1", i + 1));
        }
    }
    Ok(())
}

fn validate_passing_score(passing_score: f64) -> Result<(), String> {
    if !(0.0..=100.0).contains(&passing_score) {
        return Err("及格线必须在 0 到 100 之间".to_string());
    }
    Ok(())
}

impl CreateAssessmentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("标题不能为空".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("描述不能为空".to_string());
        }
        if self.duration < 1 {
            return Err("作答时长至少为 1 分钟".to_string());
        }
        if let Some(score) = self.passing_score {
            validate_passing_score(score)?;
        }
        // live 状态只能通过更新进入
        if self.status == Some(AssessmentStatus::Live) {
            return Err("创建时状态只能为 draft、published 或 archived".to_string());
        }
        validate_questions(&self.questions)
    }
}

impl UpdateAssessmentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref title) = self.title
            && title.trim().is_empty()
        {
            return Err("标题不能为空".to_string());
        }
        if let Some(ref description) = self.description
            && description.trim().is_empty()
        {
            return Err("描述不能为空".to_string());
        }
        if let Some(duration) = self.duration
            && duration < 1
        {
            return Err("作答时长至少为 1 分钟".to_string());
        }
        if let Some(score) = self.passing_score {
            validate_passing_score(score)?;
        }
        if let Some(ref questions) = self.questions {
            validate_questions(questions)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::QuestionType;

    fn sample_question() -> Question {
        Question {
            question: "Rust 的包管理器是？".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec!["cargo".to_string(), "npm".to_string()],
            correct_answer: Some(0),
            points: 1,
        }
    }

    fn sample_create_request() -> CreateAssessmentRequest {
        CreateAssessmentRequest {
            title: "后端笔试".to_string(),
            description: "基础知识".to_string(),
            duration: 30,
            passing_score: Some(60.0),
            start_date: None,
            end_date: None,
            difficulty: None,
            category: None,
            instructions: None,
            questions: vec![sample_question()],
            job_id: None,
            status: None,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(sample_create_request().validate().is_ok());
    }

    #[test]
    fn test_create_requires_questions() {
        let mut req = sample_create_request();
        req.questions.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_requires_two_options() {
        let mut req = sample_create_request();
        req.questions[0].options = vec!["只有一个选项".to_string()];
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_out_of_range_answer() {
        let mut req = sample_create_request();
        req.questions[0].correct_answer = Some(5);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_rejects_live_status() {
        let mut req = sample_create_request();
        req.status = Some(AssessmentStatus::Live);
        assert!(req.validate().is_err());
        req.status = Some(AssessmentStatus::Published);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_duration_and_passing_score() {
        let mut req = sample_create_request();
        req.duration = 0;
        assert!(req.validate().is_err());

        let mut req = sample_create_request();
        req.passing_score = Some(120.0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        let req = UpdateAssessmentRequest {
            title: None,
            description: None,
            duration: None,
            passing_score: None,
            start_date: None,
            end_date: None,
            difficulty: None,
            category: None,
            instructions: None,
            questions: None,
            job_id: None,
            status: None,
        };
        assert!(req.validate().is_ok());

        let req = UpdateAssessmentRequest {
            questions: Some(vec![]),
            ..req
        };
        assert!(req.validate().is_err());
    }
}
