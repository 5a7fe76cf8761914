//! Localized UI strings for the dashboard.
//!
//! Every label the page, the KPI cards and the chart show is looked up here.
//! A lookup never fails: unknown language codes resolve to [`Language::Zh`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

/// Languages the dashboard can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Simplified Chinese
    #[default]
    Zh,
    /// English
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Zh, Language::En];

    /// Resolves a language code, falling back to the default for anything unknown.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" => Language::Zh,
            "en" | "en-us" | "en_us" | "en-gb" => Language::En,
            other => {
                debug!("Unknown language code '{}', using default", other);
                Language::default()
            }
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// The other language. Applying it twice returns the original value.
    pub fn toggle(self) -> Self {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }

    pub fn texts(self) -> &'static Texts {
        Texts::for_language(self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The full label set for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Texts {
    pub title: &'static str,
    /// Template with a single `{}` placeholder for the as-of date.
    pub date_note: &'static str,
    pub kpi1: &'static str,
    pub kpi2: &'static str,
    pub kpi3: &'static str,
    pub kpi4: &'static str,
    pub kpi5: &'static str,
    pub note: &'static str,
    pub chart_title: &'static str,
    pub chart1: &'static str,
    pub chart2: &'static str,
    pub chart3: &'static str,
    pub data_title: &'static str,
    pub filter_title: &'static str,
    pub date_range: &'static str,
    pub toggle_label: &'static str,
    pub axis_count: &'static str,
    pub axis_rate: &'static str,
    pub axis_hours: &'static str,
    pub axis_efficiency: &'static str,
    pub no_data: &'static str,
    pub apply: &'static str,
    pub reset: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
}

const ZH: Texts = Texts {
    title: "📊 分拣业务运营可视化面板",
    date_note: "以下数据为{}的数据",
    kpi1: "总集包票数",
    kpi2: "错分率(%)",
    kpi3: "总工时",
    kpi4: "人效(票/小时)",
    kpi5: "机器分拣量",
    note: "💡 说明：人效(票/小时) = 总集包票数 ÷ 总工时；总工时包含 JOY、DELIN、RAPID、MB 的早、中、晚班工时（不含 PR 工时）。",
    chart_title: "分拣业务可视化面板",
    chart1: "每日分拣总量 & 错分率",
    chart2: "每日工时 & 人效趋势",
    chart3: "人工 vs 机器分拣量",
    data_title: "📄 详细数据",
    filter_title: "筛选条件",
    date_range: "选择日期范围",
    toggle_label: "English/中文",
    axis_count: "票数",
    axis_rate: "错分率(%)",
    axis_hours: "工时",
    axis_efficiency: "人效(票/小时)",
    no_data: "所选日期范围内没有数据",
    apply: "应用",
    reset: "重置",
    start_date: "开始日期",
    end_date: "结束日期",
};

const EN: Texts = Texts {
    title: "📊 Sorting Operation Dashboard",
    date_note: "Data as of {}",
    kpi1: "Total Packages",
    kpi2: "Error Rate(%)",
    kpi3: "Total Hours",
    kpi4: "Efficiency(pcs/hour)",
    kpi5: "Machine Sorting Volume",
    note: "💡 Note: Efficiency = Total Packages ÷ Total Hours; Total hours include JOY, DELIN, RAPID, MB shifts (excluding PR hours).",
    chart_title: "Sorting Operation Dashboard",
    chart1: "Daily Sorting Volume & Error Rate",
    chart2: "Daily Hours & Efficiency Trend",
    chart3: "Manual vs Machine Sorting",
    data_title: "📄 Detailed Data",
    filter_title: "Filters",
    date_range: "Select Date Range",
    toggle_label: "English/中文",
    axis_count: "Packages",
    axis_rate: "Error Rate(%)",
    axis_hours: "Hours",
    axis_efficiency: "Efficiency(pcs/hour)",
    no_data: "No data in the selected date range",
    apply: "Apply",
    reset: "Reset",
    start_date: "Start date",
    end_date: "End date",
};

impl Texts {
    pub fn for_language(language: Language) -> &'static Texts {
        match language {
            Language::Zh => &ZH,
            Language::En => &EN,
        }
    }

    /// Fills the as-of template with a `YYYY-MM-DD` date.
    pub fn date_note(&self, date: NaiveDate) -> String {
        self.date_note
            .replacen("{}", &date.format("%Y-%m-%d").to_string(), 1)
    }

    /// All keys with their strings, in display order.
    pub fn entries(&self) -> [(&'static str, &'static str); 25] {
        [
            ("title", self.title),
            ("date_note", self.date_note),
            ("kpi1", self.kpi1),
            ("kpi2", self.kpi2),
            ("kpi3", self.kpi3),
            ("kpi4", self.kpi4),
            ("kpi5", self.kpi5),
            ("note", self.note),
            ("chart_title", self.chart_title),
            ("chart1", self.chart1),
            ("chart2", self.chart2),
            ("chart3", self.chart3),
            ("data_title", self.data_title),
            ("filter_title", self.filter_title),
            ("date_range", self.date_range),
            ("toggle_label", self.toggle_label),
            ("axis_count", self.axis_count),
            ("axis_rate", self.axis_rate),
            ("axis_hours", self.axis_hours),
            ("axis_efficiency", self.axis_efficiency),
            ("no_data", self.no_data),
            ("apply", self.apply),
            ("reset", self.reset),
            ("start_date", self.start_date),
            ("end_date", self.end_date),
        ]
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

/// Transport form of a label table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocalizedTexts {
    pub language: Language,
    pub entries: BTreeMap<String, String>,
}

impl From<Language> for LocalizedTexts {
    fn from(language: Language) -> Self {
        let entries = language
            .texts()
            .entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { language, entries }
    }
}
