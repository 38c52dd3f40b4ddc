use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::JobStore;
use crate::models::{Job, JobChanges, JobFilter, JobStats, NewJob};
use crate::types::{AppResult, SortOrder};

/// In-process job store used by tests and `serve --in-memory`.
///
/// Jobs are kept in insertion order, so equal timestamps sort stably.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs across all owners
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, owner: Uuid, job: NewJob) -> AppResult<Job> {
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            owner,
            company: job.company,
            position: job.position,
            work_location: job.work_location,
            work_type: job.work_type,
            status: job.status,
            created_at: now,
            updated_at: now,
        };
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn find_by_owner(&self, owner: Uuid, filter: &JobFilter) -> AppResult<Vec<Job>> {
        let mut jobs: Vec<Job> = self
            .jobs
            .read()
            .await
            .iter()
            .filter(|j| j.owner == owner && filter.matches(j))
            .cloned()
            .collect();

        match filter.sort.unwrap_or_default() {
            SortOrder::Latest => jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Oldest => jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::PositionAsc => jobs.sort_by_cached_key(|j| j.position.to_lowercase()),
            SortOrder::PositionDesc => {
                jobs.sort_by_cached_key(|j| std::cmp::Reverse(j.position.to_lowercase()))
            }
        }
        Ok(jobs)
    }

    async fn find_one(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Job>> {
        Ok(self
            .jobs
            .read()
            .await
            .iter()
            .find(|j| j.id == id && j.owner == owner)
            .cloned())
    }

    async fn update(&self, owner: Uuid, id: Uuid, changes: JobChanges) -> AppResult<Option<Job>> {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.iter_mut().find(|j| j.id == id && j.owner == owner) else {
            return Ok(None);
        };
        changes.apply(job);
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<bool> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| !(j.id == id && j.owner == owner));
        Ok(jobs.len() < before)
    }

    async fn stats(&self, owner: Uuid) -> AppResult<JobStats> {
        let jobs = self.jobs.read().await;
        let owned: Vec<&Job> = jobs.iter().filter(|j| j.owner == owner).collect();

        Ok(JobStats::from_counts(
            owned.iter().map(|j| (j.status, 1)),
            owned.iter().map(|j| (j.work_type, 1)),
            owned.iter().map(|j| (j.created_at.date_naive(), 1)),
        ))
    }
}
