use chrono::NaiveDate;
use common::{
    AxisSlot, AxisSpec, BarMode, ChartSpec, DailyRecord, DashboardView, DateRange, KpiCard,
    KpiKind, KpiSummary, Language, LegendSpec, LocalizedTexts, Orientation, PanelSpec, SeriesKind,
    SeriesSpec, TeamHours,
};
use compute::MetricsSource;
use moka::future::Cache;
use polars::prelude::DataFrame;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Where the daily table is read from
    pub source: Arc<dyn MetricsSource>,
    /// Language used when a request does not name one
    pub default_language: Language,
    /// Loaded tables keyed by source; `None` reads the source on every request
    pub cache: Option<Cache<String, DataFrame>>,
}

/// Query parameters shared by the page and the dashboard endpoint.
///
/// Empty values (as submitted by a blank date input) count as absent. The
/// date filter applies only when both endpoints are given.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Language code (`zh` or `en`); unknown codes fall back to `zh`
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub lang: Option<String>,
    /// First day of the range (YYYY-MM-DD)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day of the range (YYYY-MM-DD)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_date: Option<NaiveDate>,
}

impl DashboardQuery {
    pub fn range(&self) -> Option<DateRange> {
        DateRange::from_bounds(self.start_date, self.end_date)
    }

    pub fn language(&self, default: Language) -> Language {
        self.lang
            .as_deref()
            .map(Language::from_code)
            .unwrap_or(default)
    }
}

impl Validate for DashboardQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.range().is_some_and(|range| range.is_inverted()) {
            let mut error = ValidationError::new("date_order");
            error.message = Some(Cow::from("start_date must not be after end_date"));
            errors.add("start_date", error);
        }
        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Query parameters for the localization endpoint
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TextsQuery {
    /// Language code (`zh` or `en`); unknown codes fall back to `zh`
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub lang: Option<String>,
}

/// Treats `""` like a missing parameter, parses anything else.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Whether the data file can be read
    pub data_source: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::texts::get_texts,
    ),
    components(
        schemas(
            ApiResponse<DashboardView>,
            ApiResponse<LocalizedTexts>,
            ErrorResponse,
            HealthResponse,
            DashboardQuery,
            TextsQuery,
            DashboardView,
            LocalizedTexts,
            Language,
            DateRange,
            DailyRecord,
            TeamHours,
            KpiSummary,
            KpiCard,
            KpiKind,
            ChartSpec,
            PanelSpec,
            SeriesSpec,
            AxisSpec,
            LegendSpec,
            SeriesKind,
            AxisSlot,
            BarMode,
            Orientation,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Sorting dashboard data"),
        (name = "i18n", description = "Localized labels"),
    ),
    info(
        title = "Sortdash API",
        description = "Daily sorting operations dashboard: KPIs, charts and raw data derived from the sorting metrics table",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> DashboardQuery {
        let uri: axum::http::Uri = format!("/?{}", query).parse().unwrap();
        axum::extract::Query::<DashboardQuery>::try_from_uri(&uri).unwrap().0
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn test_blank_dates_mean_no_filter() {
        let query = parse("lang=en&start_date=&end_date=");
        assert_eq!(query.start_date, None);
        assert_eq!(query.range(), None);
        assert_eq!(query.language(Language::Zh), Language::En);
    }

    #[test]
    fn test_single_endpoint_is_not_a_filter() {
        let query = parse("start_date=2025-03-01");
        assert_eq!(query.start_date, Some(date(3, 1)));
        assert_eq!(query.range(), None);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_fails_validation() {
        let query = parse("start_date=2025-03-05&end_date=2025-03-01");
        assert!(query.validate().is_err());

        let query = parse("start_date=2025-03-01&end_date=2025-03-01");
        assert!(query.validate().is_ok());
        assert_eq!(query.range(), Some(DateRange::new(date(3, 1), date(3, 1))));
    }

    #[test]
    fn test_language_defaults() {
        assert_eq!(parse("").language(Language::En), Language::En);
        assert_eq!(parse("lang=xx").language(Language::En), Language::Zh);
    }
}
