use crate::state::AppState;
use axum::{extract::State, http::StatusCode};
use tracing::debug;

/// 200 once reference data has been loaded, 503 before.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.cache.is_ready() {
        (StatusCode::OK, "OK")
    } else {
        debug!("Health check before first reference data load");
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}
