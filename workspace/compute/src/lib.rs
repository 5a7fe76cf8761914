//! Data side of the sorting dashboard: loading the daily table with polars,
//! deriving the metric columns, filtering by date, and turning the result into
//! KPI cards and a chart description.

pub mod chart;
pub mod columns;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod source;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use dashboard::build_dashboard;
pub use error::{ComputeError, Result};
pub use source::{CsvBytesSource, CsvFileSource, MetricsSource};
