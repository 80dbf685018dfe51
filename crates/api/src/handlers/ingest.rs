use crate::{dto::IngestRequest, state::AppState};
use axum::{
    body::Bytes,
    extract::State,
    http::{header::USER_AGENT, HeaderMap, StatusCode},
};
use tollgate_domain::{AdmissionDecision, DomainError};
use tracing::{debug, error, instrument, warn};

const UNPROCESSABLE_JSON: &str = "Unprocessable JSON";

/// `POST /ingest`: decode one event and run it through admission.
///
/// 200 when accepted, 400 with the rejection message otherwise, 503 until
/// reference data has been loaded.
#[instrument(skip_all, name = "api_ingest_event")]
pub async fn ingest_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let request: IngestRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejecting undecodable ingest body");
            return (StatusCode::BAD_REQUEST, UNPROCESSABLE_JSON);
        }
    };

    let user_agent = headers
        .get(USER_AGENT)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let event = request.into_event(user_agent);

    match state.ingest.execute(&event) {
        Ok(AdmissionDecision::Accepted) => (StatusCode::OK, ""),
        Ok(AdmissionDecision::Rejected(reason)) => (StatusCode::BAD_REQUEST, reason.message()),
        Err(DomainError::NotReady) => {
            warn!("Ingest refused, reference data not loaded yet");
            (StatusCode::SERVICE_UNAVAILABLE, "Service is not ready")
        }
        Err(e) => {
            error!(error = %e, "Ingest failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}
