//! Common transport-layer types shared by the compute crate and the web shell.
//! Everything here is plain data: serializable, documented for OpenAPI, and
//! free of polars so it can travel over the wire as-is.

pub mod chart;
mod dashboard;
pub mod i18n;
mod records;

pub use chart::{AxisSlot, AxisSpec, BarMode, ChartSpec, LegendSpec, Orientation, PanelSpec, SeriesKind, SeriesSpec};
pub use dashboard::{DashboardView, KpiCard, KpiKind, KpiSummary};
pub use i18n::{Language, LocalizedTexts, Texts};
pub use records::{DailyRecord, DateRange, Team, TeamHours};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the JSON endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
