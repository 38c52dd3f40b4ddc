//! Job endpoints
//!
//! Every handler runs behind `auth_middleware` and is scoped to the caller:
//! a job owned by someone else is indistinguishable from a missing one.
//!
//! - POST   `/create-job`
//! - GET    `/get-jobs`
//! - PATCH  `/update-job/{id}`
//! - DELETE `/delete-job/{id}`
//! - POST   `/edit-job/{id}` - status-only shorthand for update
//! - GET    `/job-stats`

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{auth_middleware, CurrentUser};
use crate::models::{
    AppState, CreateJobRequest, EditStatusRequest, Job, JobChanges, JobFilter, JobListResponse,
    JobResponse, JobStats, MessageResponse, UpdateJobRequest,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/create-job", post(create_job))
        .route("/get-jobs", get(get_jobs))
        .route("/update-job/{id}", patch(update_job))
        .route("/delete-job/{id}", delete(delete_job))
        .route("/edit-job/{id}", post(edit_job))
        .route("/job-stats", get(job_stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("No job found with id {}", id))
}

async fn create_job(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<JobResponse>)> {
    let Json(request) = payload?;
    let request = request.normalized();
    request.validate()?;

    let new_job = request.into_new_job(&state.config.jobs.default_work_location);
    let job = state.store.create(user_id, new_job).await?;
    info!(%user_id, job_id = %job.id, "job created");

    Ok((
        StatusCode::CREATED,
        Json(JobResponse {
            message: "Job created successfully".to_string(),
            job,
        }),
    ))
}

async fn get_jobs(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> AppResult<Json<JobListResponse>> {
    let Query(filter) = query?;
    let jobs = state.store.find_by_owner(user_id, &filter).await?;

    Ok(Json(JobListResponse {
        total_jobs: jobs.len(),
        jobs,
    }))
}

/// Single mutation path shared by update and edit-status.
async fn apply_changes(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    changes: JobChanges,
) -> AppResult<Job> {
    if changes.is_empty() {
        return Err(AppError::InvalidRequest(
            "Please provide at least one field to update".to_string(),
        ));
    }

    let job = state
        .store
        .update(user_id, id, changes)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!(%user_id, job_id = %id, status = %job.status, "job updated");
    Ok(job)
}

async fn update_job(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateJobRequest>, JsonRejection>,
) -> AppResult<Json<JobResponse>> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let request = request.normalized();
    request.validate()?;

    let job = apply_changes(&state, user_id, id, request.into()).await?;
    Ok(Json(JobResponse {
        message: "Job updated successfully".to_string(),
        job,
    }))
}

async fn edit_job(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EditStatusRequest>, JsonRejection>,
) -> AppResult<Json<JobResponse>> {
    let Path(id) = path?;
    let Json(request) = payload?;

    let job = apply_changes(&state, user_id, id, JobChanges::status(request.status)).await?;
    Ok(Json(JobResponse {
        message: format!("Job status updated to {}", job.status),
        job,
    }))
}

async fn delete_job(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = path?;

    if !state.store.delete(user_id, id).await? {
        return Err(not_found(id));
    }
    info!(%user_id, job_id = %id, "job deleted");

    Ok(Json(MessageResponse {
        message: "Success, Job Deleted!".to_string(),
    }))
}

async fn job_stats(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> AppResult<Json<JobStats>> {
    Ok(Json(state.store.stats(user_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::MemoryJobStore;
    use crate::middleware::issue_token;
    use crate::routes::{create_router, JOBS_PREFIX};
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        store: Arc<MemoryJobStore>,
        config: Config,
    }

    impl TestApp {
        fn new() -> Self {
            let store = Arc::new(MemoryJobStore::new());
            let config = Config::for_tests();
            let state = AppState {
                store: store.clone(),
                config: config.clone(),
            };
            Self {
                router: create_router(state),
                store,
                config,
            }
        }

        fn token_for(&self, user: Uuid) -> String {
            issue_token(&self.config.auth, user).unwrap()
        }

        async fn send(
            &self,
            method: Method,
            path: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder()
                .method(method)
                .uri(format!("{}{}", JOBS_PREFIX, path));
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        }

        async fn create(&self, token: &str, body: Value) -> Value {
            let (status, value) = self
                .send(Method::POST, "/create-job", Some(token), Some(body))
                .await;
            assert_eq!(status, StatusCode::CREATED, "{value}");
            value["job"].clone()
        }
    }

    #[tokio::test]
    async fn test_create_edit_delete_scenario() {
        let app = TestApp::new();
        let user = Uuid::new_v4();
        let token = app.token_for(user);

        let job = app
            .create(
                &token,
                json!({
                    "company": "Acme",
                    "position": "Engineer",
                    "workType": "full-time",
                    "status": "pending"
                }),
            )
            .await;

        let (status, list) = app.send(Method::GET, "/get-jobs", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["totalJobs"], 1);
        let listed = &list["jobs"][0];
        assert_eq!(listed["company"], "Acme");
        assert_eq!(listed["position"], "Engineer");
        assert_eq!(listed["workType"], "full-time");
        assert_eq!(listed["status"], "pending");
        assert_eq!(listed["owner"], user.to_string());
        assert!(listed["createdAt"].is_string());
        let id = job["id"].as_str().unwrap().to_string();
        assert_eq!(listed["id"], id.as_str());

        let (status, edited) = app
            .send(
                Method::POST,
                &format!("/edit-job/{}", id),
                Some(&token),
                Some(json!({ "status": "interview" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(edited["message"].is_string());

        let (_, list) = app.send(Method::GET, "/get-jobs", Some(&token), None).await;
        assert_eq!(list["jobs"][0]["status"], "interview");

        let (status, deleted) = app
            .send(Method::DELETE, &format!("/delete-job/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["message"], "Success, Job Deleted!");

        let (_, list) = app.send(Method::GET, "/get-jobs", Some(&token), None).await;
        assert_eq!(list["totalJobs"], 0);
        assert_eq!(list["jobs"], json!([]));
    }

    #[tokio::test]
    async fn test_requests_without_valid_token_are_rejected() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/get-jobs", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication failed");

        let (status, _) = app
            .send(
                Method::POST,
                "/create-job",
                Some("not-a-jwt"),
                Some(json!({ "company": "Acme", "position": "Engineer" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(app.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_users_never_see_each_others_jobs() {
        let app = TestApp::new();
        let alice = app.token_for(Uuid::new_v4());
        let bob = app.token_for(Uuid::new_v4());

        app.create(&alice, json!({ "company": "Acme", "position": "Engineer" }))
            .await;
        app.create(&alice, json!({ "company": "Globex", "position": "Analyst" }))
            .await;

        let (_, list) = app.send(Method::GET, "/get-jobs", Some(&bob), None).await;
        assert_eq!(list["totalJobs"], 0);

        let (_, stats) = app.send(Method::GET, "/job-stats", Some(&bob), None).await;
        assert_eq!(stats["totalJobs"], 0);
    }

    #[tokio::test]
    async fn test_foreign_delete_is_not_found_and_keeps_job() {
        let app = TestApp::new();
        let alice = app.token_for(Uuid::new_v4());
        let bob = app.token_for(Uuid::new_v4());

        let job = app
            .create(&alice, json!({ "company": "Acme", "position": "Engineer" }))
            .await;
        let id = job["id"].as_str().unwrap();

        let (status, body) = app
            .send(Method::DELETE, &format!("/delete-job/{}", id), Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(app.store.len().await, 1);

        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("/update-job/{}", id),
                Some(&bob),
                Some(json!({ "company": "Hijacked" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, list) = app.send(Method::GET, "/get-jobs", Some(&alice), None).await;
        assert_eq!(list["jobs"][0]["company"], "Acme");
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected_and_not_stored() {
        let app = TestApp::new();
        let token = app.token_for(Uuid::new_v4());
        let job = app
            .create(&token, json!({ "company": "Acme", "position": "Engineer" }))
            .await;
        let id = job["id"].as_str().unwrap();

        let (status, body) = app
            .send(
                Method::POST,
                &format!("/edit-job/{}", id),
                Some(&token),
                Some(json!({ "status": "hired" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, _) = app
            .send(
                Method::POST,
                "/create-job",
                Some(&token),
                Some(json!({ "company": "Acme", "position": "Engineer", "workType": "gig" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, list) = app.send(Method::GET, "/get-jobs", Some(&token), None).await;
        assert_eq!(list["totalJobs"], 1);
        assert_eq!(list["jobs"][0]["status"], "pending");
    }

    #[tokio::test]
    async fn test_create_requires_company_and_position() {
        let app = TestApp::new();
        let token = app.token_for(Uuid::new_v4());

        let (status, body) = app
            .send(
                Method::POST,
                "/create-job",
                Some(&token),
                Some(json!({ "company": "   ", "position": "Engineer" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("company"));
        assert!(app.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let app = TestApp::new();
        let token = app.token_for(Uuid::new_v4());
        let job = app
            .create(
                &token,
                json!({ "company": "Acme", "position": "Engineer", "workLocation": "Berlin" }),
            )
            .await;
        let id = job["id"].as_str().unwrap();

        let (status, body) = app
            .send(
                Method::PATCH,
                &format!("/update-job/{}", id),
                Some(&token),
                Some(json!({ "position": "Staff Engineer", "workType": "part-time" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job"]["position"], "Staff Engineer");
        assert_eq!(body["job"]["workType"], "part-time");
        assert_eq!(body["job"]["company"], "Acme");
        assert_eq!(body["job"]["workLocation"], "Berlin");

        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("/update-job/{}", id),
                Some(&token),
                Some(json!({})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let app = TestApp::new();
        let token = app.token_for(Uuid::new_v4());
        let (status, _) = app
            .send(Method::DELETE, "/delete-job/not-a-uuid", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let app = TestApp::new();
        let token = app.token_for(Uuid::new_v4());
        app.create(&token, json!({ "company": "Acme", "position": "Backend Engineer", "status": "interview" }))
            .await;
        app.create(&token, json!({ "company": "Globex", "position": "Designer", "workType": "internship" }))
            .await;

        let (_, list) = app
            .send(Method::GET, "/get-jobs?status=interview", Some(&token), None)
            .await;
        assert_eq!(list["totalJobs"], 1);
        assert_eq!(list["jobs"][0]["company"], "Acme");

        let (_, list) = app
            .send(Method::GET, "/get-jobs?status=all&workType=internship", Some(&token), None)
            .await;
        assert_eq!(list["totalJobs"], 1);
        assert_eq!(list["jobs"][0]["company"], "Globex");

        let (_, list) = app
            .send(Method::GET, "/get-jobs?search=ENGINEER", Some(&token), None)
            .await;
        assert_eq!(list["totalJobs"], 1);

        let (status, _) = app
            .send(Method::GET, "/get-jobs?status=hired", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_groupings_sum_to_total() {
        let app = TestApp::new();
        let token = app.token_for(Uuid::new_v4());
        for (work_type, status) in [
            ("full-time", "pending"),
            ("part-time", "interview"),
            ("internship", "reject"),
            ("other", "pending"),
            ("full-time", "interview"),
        ] {
            app.create(
                &token,
                json!({ "company": "Acme", "position": "Engineer", "workType": work_type, "status": status }),
            )
            .await;
        }

        let (status, stats) = app.send(Method::GET, "/job-stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["totalJobs"], 5);

        let sum = |key: &str| -> i64 {
            stats[key]
                .as_object()
                .unwrap()
                .values()
                .map(|v| v.as_i64().unwrap())
                .sum()
        };
        assert_eq!(sum("statusStats"), 5);
        assert_eq!(sum("workTypeStats"), 5);
        assert_eq!(stats["statusStats"]["pending"], 2);
        assert_eq!(stats["monthlyApplications"][0]["count"], 5);
    }
}
