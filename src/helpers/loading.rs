use common::{DashboardView, DateRange, Language};
use compute::build_dashboard;
use polars::prelude::DataFrame;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

use crate::error::AppError;
use crate::schemas::AppState;

/// Loads the derived table, from the cache when one is configured.
///
/// Parsing the CSV is blocking work, so it runs on the blocking pool.
#[instrument(skip(state))]
pub async fn load_table(state: &AppState) -> Result<DataFrame, AppError> {
    let cache_key = state.source.describe();

    if let Some(cache) = &state.cache {
        if let Some(frame) = cache.get(&cache_key).await {
            debug!("Serving table for {} from cache", cache_key);
            return Ok(frame);
        }
    }

    trace!("Reading table from {}", cache_key);
    let source = Arc::clone(&state.source);
    let frame = tokio::task::spawn_blocking(move || source.load()).await??;

    if let Some(cache) = &state.cache {
        cache.insert(cache_key, frame.clone()).await;
    }

    Ok(frame)
}

/// One full render pass for the given filter and language.
pub async fn load_view(
    state: &AppState,
    range: Option<DateRange>,
    language: Language,
) -> Result<DashboardView, AppError> {
    let frame = load_table(state).await?;
    Ok(build_dashboard(frame, range, language)?)
}
