use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Html,
};
use tracing::{instrument, trace};
use validator::Validate;

use crate::error::AppError;
use crate::helpers::{html::render_page, loading::load_view};
use crate::schemas::{AppState, DashboardQuery};

/// The dashboard page. Failures render as an HTML error page.
#[instrument(skip(state))]
pub async fn dashboard_page(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let Query(query) =
        query.map_err(|rejection| AppError::InvalidInput(rejection.body_text()).into_page())?;
    if let Err(errors) = query.validate() {
        return Err(AppError::InvalidInput(errors.to_string()).into_page());
    }

    let language = query.language(state.default_language);
    let view = load_view(&state, query.range(), language)
        .await
        .map_err(AppError::into_page)?;

    trace!("Rendering page in {}", language);
    Ok(Html(render_page(&view)))
}
