use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{JobPostingRow, JobSeekerRow, JobStatus};
use crate::store::JobStore;

/// `JobStore` backed by the `job_posts` and `job_seekers` tables
/// (see `migrations/0001_init.sql`).
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn get_seeker(&self, id: Uuid) -> Result<Option<JobSeekerRow>, AppError> {
        let seeker = sqlx::query_as::<_, JobSeekerRow>("SELECT * FROM job_seekers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(seeker)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError> {
        let job = sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list_active_jobs(&self) -> Result<Vec<JobPostingRow>, AppError> {
        let jobs = sqlx::query_as::<_, JobPostingRow>(
            "SELECT * FROM job_posts WHERE status = $1 ORDER BY created_at, id",
        )
        .bind(JobStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn count_seekers(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_seekers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn sample_seeker(&self) -> Result<Option<JobSeekerRow>, AppError> {
        let seeker = sqlx::query_as::<_, JobSeekerRow>(
            "SELECT * FROM job_seekers ORDER BY created_at LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(seeker)
    }
}
