use crate::{
    dto::{ReportQuery, ReportResponse},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error, instrument};

/// `GET /report?customerId=<id>&date=<YYYY-MM-DD>`
#[instrument(skip(state), name = "api_get_report")]
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, (StatusCode, String)> {
    let (customer_id, date) = query
        .parse()
        .map_err(|message| (StatusCode::BAD_REQUEST, message))?;

    match state.stats.report(date, customer_id).await {
        Ok(report) => {
            debug!(
                customer_id,
                hours = report.hourly.len(),
                "Report retrieved successfully"
            );
            Ok(Json(ReportResponse::from(&report)))
        }
        Err(e) => {
            error!(error = %e, customer_id, "Failed to build report");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
