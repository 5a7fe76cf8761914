use axum::{extract::State, response::Json};
use tracing::{instrument, warn};

use crate::schemas::{AppState, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up; `status` reports whether the data file is readable", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let available = state.source.is_available();
    if !available {
        warn!("Data source {} is not available", state.source.describe());
    }

    let response = HealthResponse {
        status: if available { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_source: if available { "available" } else { "unavailable" }.to_string(),
    };

    Json(response)
}
