use common::{DailyRecord, DateRange};
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::columns::DATE;
use crate::error::Result;

/// Keeps the rows with `start <= date <= end`, in their original order.
///
/// `None` means no filtering and returns the frame unchanged. An inverted
/// range matches nothing.
#[instrument(skip(frame), fields(rows = frame.height()))]
pub fn filter_by_date_range(frame: DataFrame, range: Option<DateRange>) -> Result<DataFrame> {
    let Some(range) = range else {
        return Ok(frame);
    };

    let filtered = frame
        .lazy()
        .filter(
            col(DATE)
                .gt_eq(lit(range.start))
                .and(col(DATE).lt_eq(lit(range.end))),
        )
        .collect()?;

    debug!(
        "Date range {} ..= {} kept {} rows",
        range.start,
        range.end,
        filtered.height()
    );
    Ok(filtered)
}

/// First and last date of a record set.
pub fn date_bounds(records: &[DailyRecord]) -> Option<DateRange> {
    let start = records.iter().map(|record| record.date).min()?;
    let end = records.iter().map(|record| record.date).max()?;
    Some(DateRange::new(start, end))
}
