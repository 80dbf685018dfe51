use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/ingest", post(handlers::ingest_event))
        .route("/report", get(handlers::get_report))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
