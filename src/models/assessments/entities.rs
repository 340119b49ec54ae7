use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测评生命周期状态
//
// draft 为初始状态；live 状态（且处于时间窗口内）才可作答；
// 创建时只允许 draft/published/archived，live 需通过更新进入。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum AssessmentStatus {
    Draft,
    Published,
    Live,
    Archived,
}

impl AssessmentStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";
    pub const LIVE: &'static str = "live";
    pub const ARCHIVED: &'static str = "archived";
}

impl<'de> Deserialize<'de> for AssessmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AssessmentStatus::DRAFT => Ok(AssessmentStatus::Draft),
            AssessmentStatus::PUBLISHED => Ok(AssessmentStatus::Published),
            AssessmentStatus::LIVE => Ok(AssessmentStatus::Live),
            AssessmentStatus::ARCHIVED => Ok(AssessmentStatus::Archived),
            _ => Err(serde::de::Error::custom(format!(
                "无效的测评状态: '{s}'. 支持的状态: draft, published, live, archived"
            ))),
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentStatus::Draft => write!(f, "{}", AssessmentStatus::DRAFT),
            AssessmentStatus::Published => write!(f, "{}", AssessmentStatus::PUBLISHED),
            AssessmentStatus::Live => write!(f, "{}", AssessmentStatus::LIVE),
            AssessmentStatus::Archived => write!(f, "{}", AssessmentStatus::ARCHIVED),
        }
    }
}

impl std::str::FromStr for AssessmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssessmentStatus::Draft),
            "published" => Ok(AssessmentStatus::Published),
            "live" => Ok(AssessmentStatus::Live),
            "archived" => Ok(AssessmentStatus::Archived),
            _ => Err(format!("Invalid assessment status: {s}")),
        }
    }
}

// 测评难度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

// 题目类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

// 题目
//
// correct_answer 是 options 的下标，出题阶段可以为空；
// 对外下发作答内容时必须剥离该字段（见 QuestionForTaking）。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Question {
    pub question: String,
    #[serde(rename = "type", default = "default_question_type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<i32>,
    #[serde(default = "default_points")]
    pub points: i64,
}

fn default_question_type() -> QuestionType {
    QuestionType::MultipleChoice
}

fn default_points() -> i64 {
    1
}

// 测评实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    // 唯一 ID
    pub id: i64,
    // 标题
    pub title: String,
    // 描述
    pub description: String,
    // 作答时长（分钟）
    pub duration: i64,
    // 及格线（0-100 百分比，可选；未配置时永远不判定通过）
    pub passing_score: Option<f64>,
    // 开放时间（为空表示不限制）
    pub start_date: Option<DateTime<Utc>>,
    // 截止时间（为空表示不限制）
    pub end_date: Option<DateTime<Utc>>,
    // 难度
    pub difficulty: Option<Difficulty>,
    // 分类
    pub category: Option<String>,
    // 作答须知
    pub instructions: Option<String>,
    // 题目列表（有序）
    pub questions: Vec<Question>,
    // 关联的岗位 ID（通过后自动推进该岗位的申请）
    pub job_id: Option<i64>,
    // 创建者 ID
    pub created_by: i64,
    // 生命周期状态
    pub status: AssessmentStatus,
    // 创建时间
    pub created_at: DateTime<Utc>,
    // 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 可作答性判定结果
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    /// 可以作答
    Open,
    /// 未处于 live 状态
    NotLive,
    /// 尚未开放，附带开放时间
    NotYetOpen(DateTime<Utc>),
    /// 已截止，附带截止时间
    Closed(DateTime<Utc>),
}

impl Assessment {
    /// 判定当前时刻能否进入作答
    ///
    /// 规则：状态必须为 live，且 now 落在 [start_date, end_date] 内；
    /// 缺失的边界视为该侧不限制。
    pub fn availability(&self, now: DateTime<Utc>) -> Availability {
        if self.status != AssessmentStatus::Live {
            return Availability::NotLive;
        }
        if let Some(start) = self.start_date
            && now < start
        {
            return Availability::NotYetOpen(start);
        }
        if let Some(end) = self.end_date
            && now > end
        {
            return Availability::Closed(end);
        }
        Availability::Open
    }

    /// 题目总分
    pub fn total_points(&self) -> i64 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// 按归属删除的结果
///
/// 删除必须区分“不存在”和“存在但不属于你”，
/// 后者需要一次不带归属过滤的二次查询来判定。
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentDeleteOutcome {
    Deleted,
    NotFound,
    NotOwner,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_assessment(status: AssessmentStatus) -> Assessment {
        Assessment {
            id: 1,
            title: "Java 基础测评".to_string(),
            description: "test".to_string(),
            duration: 30,
            passing_score: Some(60.0),
            start_date: None,
            end_date: None,
            difficulty: None,
            category: None,
            instructions: None,
            questions: vec![Question {
                question: "1 + 1 = ?".to_string(),
                question_type: QuestionType::MultipleChoice,
                options: vec!["1".to_string(), "2".to_string()],
                correct_answer: Some(1),
                points: 1,
            }],
            job_id: None,
            created_by: 10,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_availability_requires_live_status() {
        let now = Utc::now();
        for status in [
            AssessmentStatus::Draft,
            AssessmentStatus::Published,
            AssessmentStatus::Archived,
        ] {
            let assessment = sample_assessment(status);
            assert_eq!(assessment.availability(now), Availability::NotLive);
        }
        assert_eq!(
            sample_assessment(AssessmentStatus::Live).availability(now),
            Availability::Open
        );
    }

    #[test]
    fn test_availability_window() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 18, 0, 0).unwrap();

        let mut assessment = sample_assessment(AssessmentStatus::Live);
        assessment.start_date = Some(start);
        assessment.end_date = Some(end);

        let before = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(
            assessment.availability(before),
            Availability::NotYetOpen(start)
        );

        let within = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(assessment.availability(within), Availability::Open);

        let after = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(assessment.availability(after), Availability::Closed(end));
    }

    #[test]
    fn test_availability_unbounded_sides() {
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 18, 0, 0).unwrap();
        let mut assessment = sample_assessment(AssessmentStatus::Live);
        assessment.end_date = Some(end);

        // 无 start_date 时任意早的时间都可作答
        let early = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(assessment.availability(early), Availability::Open);
    }

    #[test]
    fn test_total_points() {
        let mut assessment = sample_assessment(AssessmentStatus::Live);
        assessment.questions[0].points = 3;
        assert_eq!(assessment.total_points(), 3);
    }
}
