//! Declarative chart description.
//!
//! The compute crate fills these structures; the web shell turns them into
//! whatever the browser-side charting library expects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AxisSlot {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Stack,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One data series drawn in a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeriesSpec {
    pub name: String,
    pub kind: SeriesKind,
    pub axis: AxisSlot,
    pub color: String,
    pub x: Vec<NaiveDate>,
    /// Non-finite values are serialized as `null`
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AxisSpec {
    pub title: String,
}

/// One subplot row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PanelSpec {
    pub title: String,
    pub primary_axis: AxisSpec,
    pub secondary_axis: Option<AxisSpec>,
    pub series: Vec<SeriesSpec>,
}

impl PanelSpec {
    pub fn series_on(&self, axis: AxisSlot) -> impl Iterator<Item = &SeriesSpec> {
        self.series.iter().filter(move |series| series.axis == axis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LegendSpec {
    pub orientation: Orientation,
    pub x: f64,
    pub y: f64,
    pub x_anchor: String,
    pub y_anchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSpec {
    pub title: String,
    pub height: u32,
    pub bar_mode: BarMode,
    pub legend: LegendSpec,
    pub panels: Vec<PanelSpec>,
}

impl ChartSpec {
    pub fn series_count(&self) -> usize {
        self.panels.iter().map(|panel| panel.series.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.panels
            .iter()
            .flat_map(|panel| panel.series.iter())
            .all(|series| series.x.is_empty())
    }
}
