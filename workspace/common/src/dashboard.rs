use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::chart::ChartSpec;
use crate::i18n::Language;
use crate::records::{DailyRecord, DateRange};

/// Which figure a KPI card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    TotalPackages,
    ErrorRate,
    TotalHours,
    Efficiency,
    MachineSorted,
}

/// A single labeled, pre-formatted figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiCard {
    pub kind: KpiKind,
    pub label: String,
    pub value: String,
}

/// The KPI row, taken from the most recent record on display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiSummary {
    pub as_of: NaiveDate,
    pub cards: Vec<KpiCard>,
}

impl KpiSummary {
    pub fn card(&self, kind: KpiKind) -> Option<&KpiCard> {
        self.cards.iter().find(|card| card.kind == kind)
    }
}

/// Everything one render of the dashboard shows.
///
/// When the selected range holds no records `as_of`, `as_of_note` and `kpis`
/// are `None` and `records` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub language: Language,
    /// Applied filter, absent when the whole dataset is shown
    pub range: Option<DateRange>,
    /// First and last date of the unfiltered dataset
    pub available_range: Option<DateRange>,
    pub as_of: Option<NaiveDate>,
    pub as_of_note: Option<String>,
    pub kpis: Option<KpiSummary>,
    pub chart: ChartSpec,
    pub records: Vec<DailyRecord>,
}

impl DashboardView {
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }
}
