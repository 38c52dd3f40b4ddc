use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::db::JobStore;
use crate::types::{JobStatus, SortOrder, WorkType};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobStore>,
    pub config: Config,
}

/// A tracked job application, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub owner: Uuid,
    pub company: String,
    pub position: String,
    pub work_location: String,
    pub work_type: WorkType,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a job about to be inserted. Owner and timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub company: String,
    pub position: String,
    pub work_location: String,
    pub work_type: WorkType,
    pub status: JobStatus,
}

/// Partial field set applied by an update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobChanges {
    pub company: Option<String>,
    pub position: Option<String>,
    pub work_location: Option<String>,
    pub work_type: Option<WorkType>,
    pub status: Option<JobStatus>,
}

impl JobChanges {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == JobChanges::default()
    }

    /// Merge into an existing record, used by stores that patch in memory
    pub fn apply(self, job: &mut Job) {
        if let Some(company) = self.company {
            job.company = company;
        }
        if let Some(position) = self.position {
            job.position = position;
        }
        if let Some(work_location) = self.work_location {
            job.work_location = work_location;
        }
        if let Some(work_type) = self.work_type {
            job.work_type = work_type;
        }
        if let Some(status) = self.status {
            job.status = status;
        }
    }
}

/// List filters, read from the query string.
///
/// `all` or an empty value means "no filter" for the enumerated fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    #[serde(default, deserialize_with = "all_as_none", skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, deserialize_with = "all_as_none", skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "all_as_none", skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl JobFilter {
    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn matches(&self, job: &Job) -> bool {
        if self.status.is_some_and(|s| s != job.status) {
            return false;
        }
        if self.work_type.is_some_and(|w| w != job.work_type) {
            return false;
        }
        match self.search_term() {
            Some(term) => job
                .position
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }
}

fn all_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// API Request/Response types

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "position is required"))]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_location: Option<String>,
    #[serde(default)]
    pub work_type: WorkType,
    #[serde(default)]
    pub status: JobStatus,
}

impl CreateJobRequest {
    pub fn normalized(mut self) -> Self {
        self.company = self.company.trim().to_string();
        self.position = self.position.trim().to_string();
        self.work_location = self
            .work_location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self
    }

    pub fn into_new_job(self, default_location: &str) -> NewJob {
        NewJob {
            company: self.company,
            position: self.position,
            work_location: self
                .work_location
                .unwrap_or_else(|| default_location.to_string()),
            work_type: self.work_type,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "company cannot be empty"))]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "position cannot be empty"))]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "workLocation cannot be empty"))]
    pub work_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

impl UpdateJobRequest {
    pub fn normalized(self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        Self {
            company: trim(self.company),
            position: trim(self.position),
            work_location: trim(self.work_location),
            work_type: self.work_type,
            status: self.status,
        }
    }
}

impl From<UpdateJobRequest> for JobChanges {
    fn from(req: UpdateJobRequest) -> Self {
        JobChanges {
            company: req.company,
            position: req.position,
            work_location: req.work_location,
            work_type: req.work_type,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditStatusRequest {
    pub status: JobStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub message: String,
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub total_jobs: usize,
    pub jobs: Vec<Job>,
}

/// Number of months reported in `monthlyApplications`
pub const MONTHLY_WINDOW: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub total_jobs: i64,
    pub status_stats: BTreeMap<String, i64>,
    pub work_type_stats: BTreeMap<String, i64>,
    pub monthly_applications: Vec<MonthlyCount>,
}

impl JobStats {
    /// Build stats from raw group counts. Every known category is present, zero-filled.
    ///
    /// `monthly` holds the first day of each month with its count, in any order.
    pub fn from_counts(
        by_status: impl IntoIterator<Item = (JobStatus, i64)>,
        by_work_type: impl IntoIterator<Item = (WorkType, i64)>,
        monthly: impl IntoIterator<Item = (NaiveDate, i64)>,
    ) -> Self {
        let mut status_stats: BTreeMap<String, i64> = JobStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for (status, count) in by_status {
            *status_stats.entry(status.as_str().to_string()).or_default() += count;
        }

        let mut work_type_stats: BTreeMap<String, i64> = WorkType::ALL
            .iter()
            .map(|w| (w.as_str().to_string(), 0))
            .collect();
        for (work_type, count) in by_work_type {
            *work_type_stats.entry(work_type.as_str().to_string()).or_default() += count;
        }

        let mut months: BTreeMap<(i32, u32), i64> = BTreeMap::new();
        for (date, count) in monthly {
            *months.entry((date.year(), date.month())).or_default() += count;
        }
        let monthly_applications = months
            .into_iter()
            .rev()
            .take(MONTHLY_WINDOW)
            .filter_map(|((year, month), count)| {
                NaiveDate::from_ymd_opt(year, month, 1).map(|d| MonthlyCount {
                    month: d.format("%b %Y").to_string(),
                    count,
                })
            })
            .collect();

        Self {
            total_jobs: status_stats.values().sum(),
            status_stats,
            work_type_stats,
            monthly_applications,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}
