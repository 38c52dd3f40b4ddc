// Type definitions and enums

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stage of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Interview,
    Reject,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Pending, JobStatus::Interview, JobStatus::Reject];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Interview => "interview",
            JobStatus::Reject => "reject",
        }
    }

    /// Human label used by the status selector
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Interview => "Interview",
            JobStatus::Reject => "Rejected",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            JobStatus::Pending => JobStatus::Interview,
            JobStatus::Interview => JobStatus::Reject,
            JobStatus::Reject => JobStatus::Pending,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            JobStatus::Pending => JobStatus::Reject,
            JobStatus::Interview => JobStatus::Pending,
            JobStatus::Reject => JobStatus::Interview,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "interview" => Ok(JobStatus::Interview),
            "reject" => Ok(JobStatus::Reject),
            other => Err(AppError::InvalidRequest(format!(
                "unknown status '{}', expected one of pending, interview, reject",
                other
            ))),
        }
    }
}

/// Employment category of the opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum WorkType {
    #[default]
    #[serde(rename = "full-time")]
    FullTime,
    #[serde(rename = "part-time")]
    PartTime,
    #[serde(rename = "internship")]
    Internship,
    #[serde(rename = "other", alias = "contract")]
    Other,
}

impl WorkType {
    pub const ALL: [WorkType; 4] = [
        WorkType::FullTime,
        WorkType::PartTime,
        WorkType::Internship,
        WorkType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::FullTime => "full-time",
            WorkType::PartTime => "part-time",
            WorkType::Internship => "internship",
            WorkType::Other => "other",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(WorkType::FullTime),
            "part-time" => Ok(WorkType::PartTime),
            "internship" => Ok(WorkType::Internship),
            "other" | "contract" => Ok(WorkType::Other),
            other => Err(AppError::InvalidRequest(format!(
                "unknown work type '{}', expected one of full-time, part-time, internship, other",
                other
            ))),
        }
    }
}

/// Ordering applied to the job list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "latest")]
    Latest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "a-z")]
    PositionAsc,
    #[serde(rename = "z-a")]
    PositionDesc,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            "a-z" => Ok(SortOrder::PositionAsc),
            "z-a" => Ok(SortOrder::PositionDesc),
            other => Err(AppError::InvalidRequest(format!("unknown sort '{}'", other))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(err) => {
                tracing::error!(error = %err, "database operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Auth(reason) => {
                tracing::warn!(%reason, "authentication denied");
                (StatusCode::UNAUTHORIZED, "Authentication failed".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { success: false, message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(format!("Please provide all fields: {}", errors))
    }
}
