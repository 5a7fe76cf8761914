use std::fmt;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::loader::{load_frame, read_csv_bytes, read_csv_file};

/// Where the daily metrics table comes from.
///
/// Implementations return the raw table; [`MetricsSource::load`] runs the
/// normalization and derivation on top. Every call reads the source again.
pub trait MetricsSource: fmt::Debug + Send + Sync {
    /// Human readable location, used in logs and the health check.
    fn describe(&self) -> String;

    /// Whether the source can be read right now.
    fn is_available(&self) -> bool;

    /// Year stamped onto the month/day dates of the table.
    fn report_year(&self) -> i32;

    /// Reads the raw, untyped table.
    fn read_table(&self) -> Result<DataFrame>;

    /// Reads the table and derives the metric columns.
    fn load(&self) -> Result<DataFrame> {
        let raw = self.read_table()?;
        debug!("Loaded raw table from {}", self.describe());
        load_frame(raw, self.report_year())
    }
}

/// A CSV file on disk, read fresh on every load.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    report_year: i32,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, report_year: i32) -> Self {
        Self {
            path: path.into(),
            report_year,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricsSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn report_year(&self) -> i32 {
        self.report_year
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_table(&self) -> Result<DataFrame> {
        read_csv_file(&self.path)
    }
}

/// CSV content held in memory.
#[derive(Clone)]
pub struct CsvBytesSource {
    bytes: Vec<u8>,
    report_year: i32,
}

impl CsvBytesSource {
    pub fn new(bytes: impl Into<Vec<u8>>, report_year: i32) -> Self {
        Self {
            bytes: bytes.into(),
            report_year,
        }
    }
}

impl fmt::Debug for CsvBytesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvBytesSource")
            .field("len", &self.bytes.len())
            .field("report_year", &self.report_year)
            .finish()
    }
}

impl MetricsSource for CsvBytesSource {
    fn describe(&self) -> String {
        format!("in-memory CSV ({} bytes)", self.bytes.len())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn report_year(&self) -> i32 {
        self.report_year
    }

    fn read_table(&self) -> Result<DataFrame> {
        read_csv_bytes(&self.bytes)
    }
}
