//! Reading the daily metrics table and deriving the computed columns.
//!
//! Loading is all-or-nothing: a missing file, a renamed column, a non-numeric
//! cell or an unparsable date aborts the whole load.

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use common::{DailyRecord, TeamHours};
use polars::prelude::*;
use tracing::{debug, instrument, trace, warn};

use crate::columns::*;
use crate::error::{ComputeError, Result};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01, the epoch polars counts dates from.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses CSV bytes with a header row into a raw frame.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;
    debug!("Read CSV with {} rows and {} columns", frame.height(), frame.width());
    Ok(frame)
}

/// Reads a CSV file from disk into a raw frame.
#[instrument]
pub fn read_csv_file(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path)?;
    trace!("Read {} bytes from {}", bytes.len(), path.display());
    read_csv_bytes(&bytes)
}

/// Parses a `MM月DD日` cell and stamps it with the reporting year.
///
/// Dates that do not exist in `year` (29 February in a common year) are rejected.
pub fn parse_report_date(text: &str, year: i32) -> Option<NaiveDate> {
    let stamped = format!("{}年{}", year, text.trim());
    NaiveDate::parse_from_str(&stamped, "%Y年%m月%d日").ok()
}

/// Validates the raw frame and converts it to typed columns.
///
/// The date column becomes a polars `Date`, counts become `i64` and hours `f64`.
#[instrument(skip(frame), fields(rows = frame.height()))]
pub fn normalize(mut frame: DataFrame, report_year: i32) -> Result<DataFrame> {
    let dates = parse_dates(&frame, report_year)?;

    let mut seen = HashSet::with_capacity(dates.len());
    for date in &dates {
        if !seen.insert(*date) {
            warn!("Date {} appears more than once in the source table", date);
        }
    }

    frame.with_column(Series::new(DATE.into(), dates))?;

    for name in COUNT_COLUMNS {
        let series = count_series(&frame, name)?;
        frame.with_column(series)?;
    }
    for name in HOURS_COLUMNS {
        let series = numeric_series(&frame, name)?.cast(&DataType::Float64)?;
        frame.with_column(series)?;
    }

    trace!("Normalized frame schema: {:?}", frame.schema());
    Ok(frame)
}

/// Appends the derived metric columns and fixes the column order.
///
/// Zero denominators are not guarded: they produce `inf` or `NaN`.
#[instrument(skip(frame), fields(rows = frame.height()))]
pub fn derive_metrics(frame: DataFrame) -> Result<DataFrame> {
    let total_hours = col(JOY_HOURS) + col(DELIN_HOURS) + col(RAPID_HOURS) + col(MB_HOURS);

    let mut ordered: Vec<Expr> = vec![col(DATE)];
    ordered.extend(COUNT_COLUMNS.iter().map(|name| col(*name)));
    ordered.extend(HOURS_COLUMNS.iter().map(|name| col(*name)));
    ordered.extend(DERIVED_COLUMNS.iter().map(|name| col(*name)));

    let derived = frame
        .lazy()
        .with_columns([
            (col(MISROUTED_PACKAGES).cast(DataType::Float64)
                / col(TOTAL_PACKAGES).cast(DataType::Float64)
                * lit(100.0))
            .alias(ERROR_RATE),
            total_hours.alias(TOTAL_HOURS),
            (col(TOTAL_PACKAGES) - col(MACHINE_SORTED)).alias(MANUAL_SORTED),
        ])
        .with_column(
            (col(TOTAL_PACKAGES).cast(DataType::Float64) / col(TOTAL_HOURS)).alias(EFFICIENCY),
        )
        .select(ordered)
        .collect()?;

    debug!("Derived metrics for {} rows", derived.height());
    Ok(derived)
}

/// Full pipeline from a raw frame to the derived table.
pub fn load_frame(raw: DataFrame, report_year: i32) -> Result<DataFrame> {
    derive_metrics(normalize(raw, report_year)?)
}

/// Converts a derived frame into typed rows, keeping the frame's order.
pub fn frame_to_records(frame: &DataFrame) -> Result<Vec<DailyRecord>> {
    let dates = date_values(frame)?;
    let totals = int_values(frame, TOTAL_PACKAGES)?;
    let misrouted = int_values(frame, MISROUTED_PACKAGES)?;
    let machine = int_values(frame, MACHINE_SORTED)?;
    let joy = float_values(frame, JOY_HOURS)?;
    let delin = float_values(frame, DELIN_HOURS)?;
    let rapid = float_values(frame, RAPID_HOURS)?;
    let mb = float_values(frame, MB_HOURS)?;
    let pr = float_values(frame, PR_HOURS)?;
    let error_rates = float_values(frame, ERROR_RATE)?;
    let total_hours = float_values(frame, TOTAL_HOURS)?;
    let efficiency = float_values(frame, EFFICIENCY)?;
    let manual = int_values(frame, MANUAL_SORTED)?;

    let records = (0..frame.height())
        .map(|i| DailyRecord {
            date: dates[i],
            total_packages: totals[i],
            misrouted_packages: misrouted[i],
            machine_sorted: machine[i],
            hours_by_team: TeamHours::new(joy[i], delin[i], rapid[i], mb[i]),
            excluded_hours: pr[i],
            error_rate_pct: error_rates[i],
            total_hours: total_hours[i],
            efficiency: efficiency[i],
            manual_sorted: manual[i],
        })
        .collect();

    Ok(records)
}

fn parse_dates(frame: &DataFrame, report_year: i32) -> Result<Vec<NaiveDate>> {
    let column = frame
        .column(DATE)
        .map_err(|_| ComputeError::MissingColumn(DATE.to_string()))?;
    let series = column.as_materialized_series();
    let values = series.str().map_err(|_| ComputeError::InvalidColumn {
        column: DATE.to_string(),
        reason: format!("expected month/day text, found {}", series.dtype()),
    })?;

    let mut dates = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        let value = value.unwrap_or_default();
        let date = parse_report_date(value, report_year).ok_or_else(|| ComputeError::InvalidDate {
            row,
            value: value.to_string(),
        })?;
        dates.push(date);
    }
    Ok(dates)
}

fn numeric_series(frame: &DataFrame, name: &str) -> Result<Series> {
    let column = frame
        .column(name)
        .map_err(|_| ComputeError::MissingColumn(name.to_string()))?;
    let series = column.as_materialized_series();

    // A header-only file has no values to infer a type from
    if series.is_empty() && series.dtype() == &DataType::String {
        return Ok(series.cast(&DataType::Float64)?);
    }

    let is_numeric = matches!(
        series.dtype(),
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 | DataType::Float32 | DataType::Float64
    );
    if !is_numeric {
        return Err(ComputeError::InvalidColumn {
            column: name.to_string(),
            reason: format!("expected numbers, found {}", series.dtype()),
        });
    }

    let missing = series.null_count();
    if missing > 0 {
        return Err(ComputeError::InvalidColumn {
            column: name.to_string(),
            reason: format!("{} empty cell(s)", missing),
        });
    }

    Ok(series.clone())
}

/// Counts must be whole numbers; a fractional cell is rejected rather than truncated.
fn count_series(frame: &DataFrame, name: &str) -> Result<Series> {
    let series = numeric_series(frame, name)?;
    if series.dtype().is_float() {
        let values = series.cast(&DataType::Float64)?;
        let fractional = values
            .f64()?
            .into_no_null_iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || value.fract() != 0.0);
        if let Some((row, value)) = fractional {
            return Err(ComputeError::InvalidColumn {
                column: name.to_string(),
                reason: format!("expected a whole number at row {}, found {}", row, value),
            });
        }
    }
    Ok(series.cast(&DataType::Int64)?)
}

fn date_values(frame: &DataFrame) -> Result<Vec<NaiveDate>> {
    let days = frame
        .column(DATE)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    days.i32()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .and_then(|days| NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE))
                .ok_or_else(|| ComputeError::InvalidDate {
                    row,
                    value: format!("{:?}", value),
                })
        })
        .collect()
}

fn int_values(frame: &DataFrame, name: &str) -> Result<Vec<i64>> {
    let series = frame
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    series
        .i64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| ComputeError::InvalidColumn {
                column: name.to_string(),
                reason: format!("missing value at row {}", row),
            })
        })
        .collect()
}

fn float_values(frame: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = frame
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| ComputeError::InvalidColumn {
                column: name.to_string(),
                reason: format!("missing value at row {}", row),
            })
        })
        .collect()
}
