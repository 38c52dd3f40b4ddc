// jobtrack - job application tracker: HTTP API, storage and terminal client

pub mod client;
pub mod config;
pub mod db;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod tui;       // Terminal User Interface
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
