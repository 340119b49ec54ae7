//! 判分
//!
//! 按题目定义逐题对照提交的答案。未作答、下标越界或题目未配置
//! 正确答案的，一律记 0 分但保留作答记录。

use crate::models::assessments::entities::Question;
use crate::models::assessments::requests::SubmittedAnswer;
use crate::models::results::entities::Answer;

/// 判分结果（纯计算，不含时间信息）
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub answers: Vec<Answer>,
    pub score: i64,
    pub total_points: i64,
    /// 百分比得分，保留两位小数
    pub percentage: f64,
    pub passed: bool,
}

/// 对一次提交判分
///
/// 满分为全部题目分值之和（与是否作答无关）；
/// passing_score 未配置时永远不判定通过。
pub fn score_submission(
    questions: &[Question],
    submitted: &[SubmittedAnswer],
    passing_score: Option<f64>,
) -> ScoreOutcome {
    let mut answers = Vec::with_capacity(questions.len());
    let mut score = 0i64;
    let mut total_points = 0i64;

    for (index, question) in questions.iter().enumerate() {
        total_points += question.points;

        let selected = submitted
            .iter()
            .find(|a| a.question_index == index as i32)
            .and_then(|a| a.selected_answer);

        let is_correct = match (question.correct_answer, selected) {
            (Some(correct), Some(chosen)) => correct == chosen,
            _ => false,
        };

        let points_earned = if is_correct { question.points } else { 0 };
        score += points_earned;

        answers.push(Answer {
            question_index: index as i32,
            selected_answer: selected,
            is_correct,
            points_earned,
        });
    }

    let percentage = if total_points > 0 {
        ((score as f64 / total_points as f64) * 10000.0).round() / 100.0
    } else {
        0.0
    };

    let passed = match passing_score {
        Some(threshold) => percentage >= threshold,
        None => false,
    };

    ScoreOutcome {
        answers,
        score,
        total_points,
        percentage,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::QuestionType;

    fn question(correct: Option<i32>, points: i64) -> Question {
        Question {
            question: "题目".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: correct,
            points,
        }
    }

    fn answer(index: i32, selected: Option<i32>) -> SubmittedAnswer {
        SubmittedAnswer {
            question_index: index,
            selected_answer: selected,
        }
    }

    #[test]
    fn test_partial_score() {
        let questions = vec![
            question(Some(0), 1),
            question(Some(1), 2),
            question(Some(2), 3),
        ];
        // 只答对中间一题
        let submitted = vec![answer(0, Some(1)), answer(1, Some(1)), answer(2, Some(0))];

        let outcome = score_submission(&questions, &submitted, Some(60.0));
        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.total_points, 6);
        assert_eq!(outcome.percentage, 33.33);
        assert!(!outcome.passed);
        assert_eq!(outcome.answers.len(), 3);
        assert!(outcome.answers[1].is_correct);
        assert_eq!(outcome.answers[1].points_earned, 2);
    }

    #[test]
    fn test_full_score_passes() {
        let questions = vec![question(Some(0), 2), question(Some(2), 2)];
        let submitted = vec![answer(0, Some(0)), answer(1, Some(2))];

        let outcome = score_submission(&questions, &submitted, Some(60.0));
        assert_eq!(outcome.score, 4);
        assert_eq!(outcome.percentage, 100.0);
        assert!(outcome.passed);
    }

    #[test]
    fn test_missing_answers_count_as_wrong() {
        let questions = vec![question(Some(0), 1), question(Some(1), 1)];
        // 完全没作答
        let outcome = score_submission(&questions, &[], Some(50.0));
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.percentage, 0.0);
        assert!(!outcome.passed);
        // 每题依然有记录
        assert_eq!(outcome.answers.len(), 2);
        assert!(outcome.answers.iter().all(|a| a.selected_answer.is_none()));
    }

    #[test]
    fn test_question_without_correct_answer_earns_nothing() {
        let questions = vec![question(None, 5)];
        let submitted = vec![answer(0, Some(0))];

        let outcome = score_submission(&questions, &submitted, None);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.total_points, 5);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_no_passing_score_never_passes() {
        let questions = vec![question(Some(0), 1)];
        let submitted = vec![answer(0, Some(0))];

        let outcome = score_submission(&questions, &submitted, None);
        assert_eq!(outcome.percentage, 100.0);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_zero_questions_guard() {
        let outcome = score_submission(&[], &[], Some(60.0));
        assert_eq!(outcome.total_points, 0);
        assert_eq!(outcome.percentage, 0.0);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_exact_threshold_passes() {
        let questions = vec![question(Some(0), 1), question(Some(0), 1)];
        let submitted = vec![answer(0, Some(0)), answer(1, Some(1))];

        let outcome = score_submission(&questions, &submitted, Some(50.0));
        assert_eq!(outcome.percentage, 50.0);
        assert!(outcome.passed);
    }
}
