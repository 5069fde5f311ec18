//! Storage capability consumed by the matching service.
//!
//! The service never talks to a database directly: `AppState` carries an
//! `Arc<dyn JobStore>`, built once at startup. `PgJobStore` is the production
//! backend; `InMemoryStore` stands in for it in tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{JobPostingRow, JobSeekerRow};

#[cfg(test)]
pub use memory::InMemoryStore;
pub use postgres::PgJobStore;

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Looks up a seeker profile. `Ok(None)` when the id is unknown.
    async fn get_seeker(&self, id: Uuid) -> Result<Option<JobSeekerRow>, AppError>;

    /// Looks up a posting regardless of status. `Ok(None)` when the id is unknown.
    async fn get_job(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError>;

    /// Every posting with status `active`, in stable store order.
    async fn list_active_jobs(&self) -> Result<Vec<JobPostingRow>, AppError>;

    async fn count_seekers(&self) -> Result<i64, AppError>;

    /// Any one seeker, for inspecting what the store holds.
    async fn sample_seeker(&self) -> Result<Option<JobSeekerRow>, AppError>;
}
