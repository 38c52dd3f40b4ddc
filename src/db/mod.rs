//! Job persistence
//!
//! `JobStore` is the seam between handlers and storage. Every method takes the
//! caller's id and only ever touches rows owned by it.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::models::{Job, JobChanges, JobFilter, JobStats, NewJob};
use crate::types::AppResult;

pub use memory::*;
pub use operations::*;

pub mod memory;
pub mod operations;

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, owner: Uuid, job: NewJob) -> AppResult<Job>;

    async fn find_by_owner(&self, owner: Uuid, filter: &JobFilter) -> AppResult<Vec<Job>>;

    async fn find_one(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Job>>;

    /// Returns `None` when no job with `id` belongs to `owner`.
    async fn update(&self, owner: Uuid, id: Uuid, changes: JobChanges) -> AppResult<Option<Job>>;

    /// Returns `false` when no job with `id` belongs to `owner`.
    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<bool>;

    async fn stats(&self, owner: Uuid) -> AppResult<JobStats>;

    /// Cheap liveness probe for the health endpoint
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await?;

    // Test connection
    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))
}
