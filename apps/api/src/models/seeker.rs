use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSeekerRow {
    pub id: Uuid,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}
