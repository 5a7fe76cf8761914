use common::{DashboardView, DateRange, Language};
use polars::prelude::DataFrame;
use tracing::{debug, info, instrument};

use crate::chart::compose_chart;
use crate::error::Result;
use crate::filter::{date_bounds, filter_by_date_range};
use crate::kpi::summarize;
use crate::loader::frame_to_records;

/// One full render pass: filter the derived table, then summarize and chart it.
///
/// `frame` is the derived table as produced by [`crate::source::MetricsSource::load`].
/// The as-of date is taken from the records actually shown, so a filter moves it.
#[instrument(skip(frame), fields(rows = frame.height()))]
pub fn build_dashboard(
    frame: DataFrame,
    range: Option<DateRange>,
    language: Language,
) -> Result<DashboardView> {
    let texts = language.texts();
    let available_range = date_bounds(&frame_to_records(&frame)?);

    let filtered = filter_by_date_range(frame, range)?;
    let records = frame_to_records(&filtered)?;

    let kpis = summarize(&records, texts);
    let as_of = kpis.as_ref().map(|summary| summary.as_of);
    let as_of_note = as_of.map(|date| texts.date_note(date));
    let chart = compose_chart(&records, texts);

    match as_of {
        Some(date) => debug!("Dashboard as of {} with {} records", date, records.len()),
        None => info!("No records in range {:?}", range),
    }

    Ok(DashboardView {
        language,
        range,
        available_range,
        as_of,
        as_of_note,
        kpis,
        chart,
        records,
    })
}
