#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use common::Language;
    use compute::testing::{FIXTURE_YEAR, TWO_DAY_CSV, WEEK_CSV};
    use compute::{CsvBytesSource, CsvFileSource, MetricsSource};
    use moka::future::Cache;
    use std::sync::Arc;
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    fn app_state(source: impl MetricsSource + 'static) -> AppState {
        AppState {
            source: Arc::new(source),
            default_language: Language::Zh,
            cache: None,
        }
    }

    /// Two hand-checkable days, see [`TWO_DAY_CSV`]
    pub fn setup_test_app_state() -> AppState {
        app_state(CsvBytesSource::new(TWO_DAY_CSV, FIXTURE_YEAR))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        create_router(setup_test_app_state())
    }

    /// App over the unsorted week of data
    pub fn setup_week_app() -> Router {
        create_router(app_state(CsvBytesSource::new(WEEK_CSV, FIXTURE_YEAR)))
    }

    /// App whose data file does not exist
    pub fn setup_missing_file_app() -> Router {
        create_router(app_state(CsvFileSource::new(
            "does/not/exist.csv",
            FIXTURE_YEAR,
        )))
    }

    /// App over an arbitrary CSV text
    pub fn setup_csv_app(csv: &str) -> Router {
        create_router(app_state(CsvBytesSource::new(csv, FIXTURE_YEAR)))
    }

    /// App with English as the default language and the table cache enabled
    pub fn setup_cached_app() -> Router {
        let mut state = setup_test_app_state();
        state.default_language = Language::En;
        state.cache = Some(
            Cache::builder()
                .max_capacity(16)
                .time_to_live(Duration::from_secs(60))
                .build(),
        );
        create_router(state)
    }
}
