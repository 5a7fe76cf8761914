//! The fixed three-panel dashboard chart.
//!
//! Series names are source column names and do not change with the language;
//! only titles and axis labels come from the localization table.

use common::{
    AxisSlot, AxisSpec, BarMode, ChartSpec, DailyRecord, LegendSpec, Orientation, PanelSpec,
    SeriesKind, SeriesSpec, Team, Texts,
};
use tracing::{instrument, trace};

use crate::columns::{self, team_hours_column};

pub const CHART_HEIGHT: u32 = 900;

fn team_color(team: Team) -> &'static str {
    match team {
        Team::Joy => "orange",
        Team::Delin => "green",
        Team::Rapid => "purple",
        Team::Mb => "brown",
    }
}

fn series(
    records: &[DailyRecord],
    name: &str,
    kind: SeriesKind,
    axis: AxisSlot,
    color: &str,
    value: impl Fn(&DailyRecord) -> f64,
) -> SeriesSpec {
    SeriesSpec {
        name: name.to_string(),
        kind,
        axis,
        color: color.to_string(),
        x: records.iter().map(|record| record.date).collect(),
        y: records.iter().map(value).collect(),
    }
}

fn axis(title: &str) -> AxisSpec {
    AxisSpec {
        title: title.to_string(),
    }
}

/// Builds the chart from the (possibly filtered) records.
#[instrument(skip(records, texts), fields(records = records.len()))]
pub fn compose_chart(records: &[DailyRecord], texts: &Texts) -> ChartSpec {
    let volume_panel = PanelSpec {
        title: texts.chart1.to_string(),
        primary_axis: axis(texts.axis_count),
        secondary_axis: Some(axis(texts.axis_rate)),
        series: vec![
            series(records, columns::TOTAL_PACKAGES, SeriesKind::Bar, AxisSlot::Primary, "skyblue", |r| {
                r.total_packages as f64
            }),
            series(records, columns::ERROR_RATE, SeriesKind::Line, AxisSlot::Secondary, "red", |r| {
                r.error_rate_pct
            }),
        ],
    };

    let mut hours_series: Vec<SeriesSpec> = Team::ALL
        .iter()
        .map(|team| {
            let team = *team;
            series(
                records,
                team_hours_column(team),
                SeriesKind::Bar,
                AxisSlot::Primary,
                team_color(team),
                move |r| r.hours_by_team.get(team),
            )
        })
        .collect();
    hours_series.push(series(
        records,
        columns::EFFICIENCY,
        SeriesKind::Line,
        AxisSlot::Secondary,
        "blue",
        |r| r.efficiency,
    ));

    let hours_panel = PanelSpec {
        title: texts.chart2.to_string(),
        primary_axis: axis(texts.axis_hours),
        secondary_axis: Some(axis(texts.axis_efficiency)),
        series: hours_series,
    };

    let sorting_panel = PanelSpec {
        title: texts.chart3.to_string(),
        primary_axis: axis(texts.axis_count),
        secondary_axis: None,
        series: vec![
            series(records, columns::MANUAL_SORTED, SeriesKind::Bar, AxisSlot::Primary, "coral", |r| {
                r.manual_sorted as f64
            }),
            series(records, columns::MACHINE_SORTED, SeriesKind::Bar, AxisSlot::Primary, "skyblue", |r| {
                r.machine_sorted as f64
            }),
        ],
    };

    let chart = ChartSpec {
        title: texts.chart_title.to_string(),
        height: CHART_HEIGHT,
        bar_mode: BarMode::Stack,
        legend: LegendSpec {
            orientation: Orientation::Horizontal,
            x: 0.5,
            y: -0.2,
            x_anchor: "center".to_string(),
            y_anchor: "bottom".to_string(),
        },
        panels: vec![volume_panel, hours_panel, sorting_panel],
    };

    trace!("Composed chart with {} series", chart.series_count());
    chart
}
