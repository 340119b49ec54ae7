use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 岗位申请状态
//
// 申请的增删改由求职模块负责，本服务只在学生通过关联测评时
// 把状态推进到 shortlisted（已是 accepted 时除外）。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/application.ts")]
pub enum JobApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Accepted,
}

impl std::fmt::Display for JobApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobApplicationStatus::Pending => "pending",
            JobApplicationStatus::Reviewed => "reviewed",
            JobApplicationStatus::Shortlisted => "shortlisted",
            JobApplicationStatus::Rejected => "rejected",
            JobApplicationStatus::Accepted => "accepted",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for JobApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobApplicationStatus::Pending),
            "reviewed" => Ok(JobApplicationStatus::Reviewed),
            "shortlisted" => Ok(JobApplicationStatus::Shortlisted),
            "rejected" => Ok(JobApplicationStatus::Rejected),
            "accepted" => Ok(JobApplicationStatus::Accepted),
            _ => Err(format!("Invalid job application status: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for JobApplicationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// 岗位申请实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/application.ts")]
pub struct JobApplication {
    pub id: i64,
    pub job_id: i64,
    pub student_id: i64,
    pub status: JobApplicationStatus,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
