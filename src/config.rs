use anyhow::Result;
use common::Language;
use compute::CsvFileSource;
use config::{Config, Environment, File};
use moka::future::Cache;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::schemas::AppState;

/// Runtime settings.
///
/// Resolved from built-in defaults, then an optional `sortdash.toml`, then
/// `SORTDASH_*` environment variables (a `.env` file is honored).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// CSV file with the daily sorting metrics
    pub data_path: PathBuf,
    /// Address the web server binds to
    pub bind_address: String,
    /// Year stamped onto the month/day dates of the table
    pub report_year: i32,
    /// Language used when a request does not ask for one
    pub default_language: String,
    /// Lifetime of the in-memory table cache; 0 reads the file on every request
    pub cache_ttl_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("data_path", "data.csv")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("report_year", 2025_i64)?
            .set_default("default_language", "zh")?
            .set_default("cache_ttl_secs", 0_i64)?
            .add_source(File::with_name("sortdash").required(false))
            .add_source(Environment::with_prefix("SORTDASH").try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;

        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.default_language)
    }
}

/// Build the shared application state from resolved settings.
pub fn initialize_app_state(settings: Settings) -> Result<AppState> {
    let source = CsvFileSource::new(settings.data_path.clone(), settings.report_year);
    info!("Using data file: {}", settings.data_path.display());

    let cache = if settings.cache_ttl_secs > 0 {
        info!("Caching the loaded table for {} seconds", settings.cache_ttl_secs);
        Some(
            Cache::builder()
                .max_capacity(16)
                .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
                .build(),
        )
    } else {
        None
    };

    if settings.language().code() != settings.default_language.trim().to_ascii_lowercase() {
        warn!(
            "Unknown default language '{}', falling back to {}",
            settings.default_language,
            settings.language()
        );
    }

    Ok(AppState {
        default_language: settings.language(),
        source: Arc::new(source),
        cache,
    })
}
