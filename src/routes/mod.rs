//! API Routes
//!
//! - `/api/v1/job/*` - job CRUD and stats, behind bearer authentication
//! - `/api/health` - health check

pub mod health;
pub mod jobs;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Path prefix of the job endpoints
pub const JOBS_PREFIX: &str = "/api/v1/job";

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .nest(JOBS_PREFIX, jobs::router(state.clone()))
        .merge(health::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.server))
}
