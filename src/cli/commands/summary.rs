use anyhow::{Result, bail};
use chrono::NaiveDate;
use common::{DashboardView, DateRange, Language};
use compute::{CsvFileSource, MetricsSource, build_dashboard};
use std::fmt::Write;
use tracing::{debug, info};

use crate::config::Settings;

/// Loads the table, builds the view and prints its KPI row to stdout.
pub fn print_summary(
    settings: Settings,
    lang: Option<&str>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<()> {
    let range = DateRange::from_bounds(start_date, end_date);
    if range.is_some_and(|range| range.is_inverted()) {
        bail!("start date must not be after end date");
    }

    let language = lang.map(Language::from_code).unwrap_or_else(|| settings.language());
    let source = CsvFileSource::new(settings.data_path, settings.report_year);
    info!("Summarizing {}", source.describe());

    let frame = source.load()?;
    let view = build_dashboard(frame, range, language)?;
    debug!("Summary covers {} records", view.records.len());

    print!("{}", format_summary(&view));
    Ok(())
}

/// Terminal rendering of the as-of note and the KPI cards.
pub fn format_summary(view: &DashboardView) -> String {
    let texts = view.language.texts();
    let mut out = String::new();

    let _ = writeln!(out, "{}", texts.title);
    let Some(kpis) = &view.kpis else {
        let _ = writeln!(out, "{}", texts.no_data);
        return out;
    };

    if let Some(note) = &view.as_of_note {
        let _ = writeln!(out, "{}", note);
    }
    let width = kpis
        .cards
        .iter()
        .map(|card| card.label.chars().count())
        .max()
        .unwrap_or(0);
    for card in &kpis.cards {
        let pad = width - card.label.chars().count();
        let _ = writeln!(out, "  {}{}  {}", card.label, " ".repeat(pad), card.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute::loader::{load_frame, read_csv_bytes};
    use compute::testing::{FIXTURE_YEAR, TWO_DAY_CSV, date};

    fn view(language: Language, range: Option<DateRange>) -> DashboardView {
        let raw = read_csv_bytes(TWO_DAY_CSV.as_bytes()).unwrap();
        build_dashboard(load_frame(raw, FIXTURE_YEAR).unwrap(), range, language).unwrap()
    }

    #[test]
    fn test_summary_lists_latest_cards() {
        let out = format_summary(&view(Language::En, None));
        assert!(out.contains("Data as of 2025-03-02"));
        assert!(out.contains("Total Packages"));
        assert!(out.lines().any(|line| line.trim_end().ends_with("16.67")));
        assert_eq!(out.lines().count(), 2 + 5);
    }

    #[test]
    fn test_summary_without_data() {
        let range = DateRange::new(date(5, 1), date(5, 2));
        let out = format_summary(&view(Language::Zh, Some(range)));
        assert!(out.contains(Language::Zh.texts().no_data));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let settings = Settings {
            data_path: "does/not/exist.csv".into(),
            bind_address: "127.0.0.1:0".to_string(),
            report_year: FIXTURE_YEAR,
            default_language: "zh".to_string(),
            cache_ttl_secs: 0,
        };
        assert!(print_summary(settings, None, None, None).is_err());
    }
}
