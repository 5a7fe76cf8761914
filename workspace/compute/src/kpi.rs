use common::{DailyRecord, KpiCard, KpiKind, KpiSummary, Texts};
use tracing::{debug, instrument};

/// The record with the greatest date. On ties the earliest row wins.
pub fn latest_record(records: &[DailyRecord]) -> Option<&DailyRecord> {
    records.iter().fold(None, |latest, record| match latest {
        Some(current) if current.date >= record.date => Some(current),
        _ => Some(record),
    })
}

/// Builds the five KPI cards from the most recent record.
///
/// Returns `None` when there is nothing to summarize.
#[instrument(skip(records, texts), fields(records = records.len()))]
pub fn summarize(records: &[DailyRecord], texts: &Texts) -> Option<KpiSummary> {
    let latest = latest_record(records)?;
    debug!("Summarizing KPIs as of {}", latest.date);

    let card = |kind, label: &str, value: String| KpiCard {
        kind,
        label: label.to_string(),
        value,
    };

    Some(KpiSummary {
        as_of: latest.date,
        cards: vec![
            card(KpiKind::TotalPackages, texts.kpi1, format_thousands(latest.total_packages)),
            card(KpiKind::ErrorRate, texts.kpi2, format_fixed(latest.error_rate_pct, 3)),
            card(KpiKind::TotalHours, texts.kpi3, format_fixed(latest.total_hours, 2)),
            card(KpiKind::Efficiency, texts.kpi4, format_fixed(latest.efficiency, 2)),
            card(KpiKind::MachineSorted, texts.kpi5, format_thousands(latest.machine_sorted)),
        ],
    })
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Fixed precision; non-finite values print as `inf`, `-inf` or `nan`.
pub fn format_fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    format!("{:.*}", precision, value)
}
