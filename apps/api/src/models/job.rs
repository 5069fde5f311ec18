use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle state of a posting. Only `Active` postings are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Inactive,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub skills: Vec<String>,
    /// Required years of experience.
    pub experience: i32,
    pub industries: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl JobPostingRow {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case(JobStatus::Active.as_str())
    }

    /// Required years, with negative column values treated as zero.
    pub fn required_experience(&self) -> u32 {
        self.experience.max(0) as u32
    }
}
