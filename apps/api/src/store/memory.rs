use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{JobPostingRow, JobSeekerRow};
use crate::store::JobStore;

/// Vec-backed store for tests. Insertion order is the store order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub jobs: Vec<JobPostingRow>,
    pub seekers: Vec<JobSeekerRow>,
}

impl InMemoryStore {
    pub fn new(jobs: Vec<JobPostingRow>, seekers: Vec<JobSeekerRow>) -> Self {
        Self { jobs, seekers }
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn get_seeker(&self, id: Uuid) -> Result<Option<JobSeekerRow>, AppError> {
        Ok(self.seekers.iter().find(|s| s.id == id).cloned())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError> {
        Ok(self.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_active_jobs(&self) -> Result<Vec<JobPostingRow>, AppError> {
        Ok(self.jobs.iter().filter(|j| j.is_active()).cloned().collect())
    }

    async fn count_seekers(&self) -> Result<i64, AppError> {
        Ok(self.seekers.len() as i64)
    }

    async fn sample_seeker(&self) -> Result<Option<JobSeekerRow>, AppError> {
        Ok(self.seekers.first().cloned())
    }
}
