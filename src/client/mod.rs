//! HTTP client for the job API
//!
//! Used by the terminal client. Failures keep the server's `message` verbatim
//! so the UI can show it to the user.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::models::{
    CreateJobRequest, EditStatusRequest, Job, JobFilter, JobListResponse, JobResponse, JobStats,
    MessageResponse, UpdateJobRequest,
};
use crate::routes::JOBS_PREFIX;
use crate::types::{ErrorBody, JobStatus};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// The server-provided message, when the server sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message to show the user, falling back to `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Operations the terminal client needs from the backend
#[async_trait]
pub trait JobsApi: Send + Sync {
    async fn list_jobs(&self, filter: &JobFilter) -> ClientResult<Vec<Job>>;

    /// Returns the server's confirmation message
    async fn edit_status(&self, id: Uuid, status: JobStatus) -> ClientResult<String>;

    /// Returns the server's confirmation message
    async fn delete_job(&self, id: Uuid) -> ClientResult<String>;
}

#[derive(Clone)]
pub struct JobsClient {
    http: Client,
    base_url: String,
    token: String,
}

impl JobsClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}{}", self.base_url, JOBS_PREFIX, path))
            .bearer_auth(&self.token)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();
        Err(ClientError::Api { status, message })
    }

    pub async fn create_job(&self, request: &CreateJobRequest) -> ClientResult<JobResponse> {
        let response = self
            .request(Method::POST, "/create-job")
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_job(&self, id: Uuid, request: &UpdateJobRequest) -> ClientResult<JobResponse> {
        let response = self
            .request(Method::PATCH, &format!("/update-job/{}", id))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn stats(&self) -> ClientResult<JobStats> {
        let response = self.request(Method::GET, "/job-stats").send().await?;
        Self::parse(response).await
    }
}

#[async_trait]
impl JobsApi for JobsClient {
    async fn list_jobs(&self, filter: &JobFilter) -> ClientResult<Vec<Job>> {
        let response = self
            .request(Method::GET, "/get-jobs")
            .query(filter)
            .send()
            .await?;
        let list: JobListResponse = Self::parse(response).await?;
        Ok(list.jobs)
    }

    async fn edit_status(&self, id: Uuid, status: JobStatus) -> ClientResult<String> {
        let response = self
            .request(Method::POST, &format!("/edit-job/{}", id))
            .json(&EditStatusRequest { status })
            .send()
            .await?;
        let body: JobResponse = Self::parse(response).await?;
        Ok(body.message)
    }

    async fn delete_job(&self, id: Uuid) -> ClientResult<String> {
        let response = self
            .request(Method::DELETE, &format!("/delete-job/{}", id))
            .send()
            .await?;
        let body: MessageResponse = Self::parse(response).await?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn job_json(id: Uuid) -> serde_json::Value {
        json!({
            "id": id,
            "owner": Uuid::new_v4(),
            "company": "Acme",
            "position": "Engineer",
            "workLocation": "Remote",
            "workType": "full-time",
            "status": "pending",
            "createdAt": "2026-10-01T12:00:00Z",
            "updatedAt": "2026-10-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_sends_token_and_filters() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let mock = server
            .mock("GET", "/api/v1/job/get-jobs")
            .match_header("authorization", "Bearer secret-token")
            .match_query(Matcher::UrlEncoded("status".into(), "interview".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "totalJobs": 1, "jobs": [job_json(id)] }).to_string())
            .create_async()
            .await;

        let client = JobsClient::new(server.url(), "secret-token");
        let filter = JobFilter {
            status: Some(JobStatus::Interview),
            ..Default::default()
        };
        let jobs = client.list_jobs(&filter).await.unwrap();

        mock.assert_async().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, id);
    }

    #[tokio::test]
    async fn test_error_carries_server_message() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        server
            .mock("DELETE", format!("/api/v1/job/delete-job/{}", id).as_str())
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(json!({ "success": false, "message": "No job found" }).to_string())
            .create_async()
            .await;

        let client = JobsClient::new(server.url(), "t");
        let err = client.delete_job(id).await.unwrap_err();

        assert!(matches!(err, ClientError::Api { status, .. } if status == StatusCode::NOT_FOUND));
        assert_eq!(err.user_message("fallback"), "No job found");
    }

    #[tokio::test]
    async fn test_error_without_body_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        server
            .mock("POST", format!("/api/v1/job/edit-job/{}", id).as_str())
            .match_body(Matcher::Json(json!({ "status": "reject" })))
            .with_status(502)
            .create_async()
            .await;

        let client = JobsClient::new(format!("{}/", server.url()), "t");
        let err = client.edit_status(id, JobStatus::Reject).await.unwrap_err();
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("Failed to update status"), "Failed to update status");
    }

    #[tokio::test]
    async fn test_create_and_stats() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let create = server
            .mock("POST", "/api/v1/job/create-job")
            .match_body(Matcher::PartialJson(json!({ "company": "Acme", "workType": "internship" })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({ "message": "Job created successfully", "job": job_json(id) }).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/job/job-stats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "totalJobs": 1,
                    "statusStats": { "pending": 1, "interview": 0, "reject": 0 },
                    "workTypeStats": { "full-time": 1, "part-time": 0, "internship": 0, "other": 0 },
                    "monthlyApplications": [{ "month": "Oct 2026", "count": 1 }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = JobsClient::new(server.url(), "t");
        let request = CreateJobRequest {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            work_location: None,
            work_type: crate::types::WorkType::Internship,
            status: JobStatus::Pending,
        };
        let created = client.create_job(&request).await.unwrap();
        create.assert_async().await;
        assert_eq!(created.job.id, id);

        let stats = client.stats().await.unwrap();
        assert_eq!(stats.total_jobs, 1);
        assert_eq!(stats.monthly_applications[0].month, "Oct 2026");
    }

    #[tokio::test]
    async fn test_update_sends_only_set_fields() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let mock = server
            .mock("PATCH", format!("/api/v1/job/update-job/{}", id).as_str())
            .match_header("authorization", "Bearer t")
            .match_body(Matcher::Json(json!({ "position": "Staff Engineer" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "message": "Job updated successfully", "job": job_json(id) }).to_string())
            .create_async()
            .await;

        let client = JobsClient::new(server.url(), "t");
        let request = UpdateJobRequest {
            position: Some("Staff Engineer".to_string()),
            ..Default::default()
        };
        let updated = client.update_job(id, &request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(updated.message, "Job updated successfully");
        assert_eq!(updated.job.id, id);
    }
}
