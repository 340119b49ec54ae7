use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单题作答记录
//
// is_correct / points_earned 由判分函数派生，不接受客户端输入。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct Answer {
    pub question_index: i32,
    pub selected_answer: Option<i32>,
    pub is_correct: bool,
    pub points_earned: i64,
}

// 测评结果（作答台账）
//
// 每个 (assessment_id, student_id) 至多一条，由存储层唯一索引保证。
// submitted_at 为空表示进行中；一旦写入即为终态，后续提交只会得到冲突。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AssessmentResult {
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub answers: Vec<Answer>,
    pub score: i64,
    pub total_points: i64,
    pub percentage: f64,
    pub passed: bool,
    pub started_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    // 用时（分钟）
    pub time_taken: i64,
    // 是否为倒计时耗尽的自动提交
    pub auto_submitted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssessmentResult {
    /// 是否已是终态（已提交）
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }
}

/// 待落账的判分记录（存储层输入）
#[derive(Debug, Clone)]
pub struct NewResultRecord {
    pub answers: Vec<Answer>,
    pub score: i64,
    pub total_points: i64,
    pub percentage: f64,
    pub passed: bool,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub time_taken: i64,
    pub auto_submitted: bool,
}

/// 落账结果
///
/// 并发的重复提交（包括先查后写竞态中靠唯一索引拦下的那一次）
/// 统一折叠为 AlreadySubmitted，携带已存在的记录。
#[derive(Debug, Clone)]
pub enum ResultCommitOutcome {
    Committed(AssessmentResult),
    AlreadySubmitted(AssessmentResult),
}
