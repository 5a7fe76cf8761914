use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::DashboardView;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::helpers::loading::load_view;
use crate::schemas::{ApiResponse, AppState, DashboardQuery, ErrorResponse};

/// Get the dashboard view as JSON
///
/// Returns the same KPIs, chart description and records the page renders.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard built successfully", body = ApiResponse<DashboardView>),
        (status = 400, description = "Invalid date range"),
        (status = 500, description = "Data file missing or malformed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<DashboardQuery>>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let language = query.language(state.default_language);
    let view = load_view(&state, query.range(), language).await?;
    debug!("Built dashboard with {} records", view.records.len());

    let message = if view.has_data() {
        "Dashboard retrieved successfully"
    } else {
        "No data in the selected date range"
    };

    Ok(Json(ApiResponse::ok(view, message)))
}
