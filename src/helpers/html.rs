//! Server-rendered dashboard page.

use axum::http::StatusCode;
use common::{DailyRecord, DashboardView, DateRange, Team, Texts};
use compute::columns;
use compute::kpi::format_fixed;

use super::plotly::to_plotly;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { margin: 0; font-family: "Helvetica Neue", Arial, "PingFang SC", "Microsoft YaHei", sans-serif; color: #262730; }
.layout { display: flex; min-height: 100vh; }
aside { width: 280px; padding: 24px; background: #f0f2f6; box-sizing: border-box; }
aside form { margin-bottom: 16px; }
aside label { display: block; margin: 8px 0 4px; font-size: 14px; }
aside input[type=date] { width: 100%; padding: 4px; box-sizing: border-box; }
aside button, aside a.reset { margin-top: 12px; padding: 6px 12px; font-size: 14px; }
main { flex: 1; padding: 24px 48px; overflow-x: auto; }
.note { color: #555; }
.kpis { display: flex; gap: 16px; margin: 16px 0; }
.kpi { flex: 1; padding: 12px 16px; border: 1px solid #e6e9ef; border-radius: 8px; }
.kpi .label { font-size: 14px; color: #555; }
.kpi .value { font-size: 28px; margin-top: 4px; }
.caption { font-size: 13px; color: #808495; }
.empty { padding: 12px 16px; background: #fff4e5; border-radius: 8px; }
table { border-collapse: collapse; font-size: 13px; }
th, td { border: 1px solid #e6e9ef; padding: 4px 8px; text-align: right; white-space: nowrap; }
th { background: #f0f2f6; }
"#;

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn date_value(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn render_sidebar(view: &DashboardView, texts: &Texts) -> String {
    let lang = view.language.code();
    let other = view.language.toggle().code();
    let shown = view.range.or(view.available_range);
    let start = date_value(shown.map(|r| r.start));
    let end = date_value(shown.map(|r| r.end));
    let (min, max) = match view.available_range {
        Some(DateRange { start, end }) => (
            format!(r#" min="{}""#, start.format("%Y-%m-%d")),
            format!(r#" max="{}""#, end.format("%Y-%m-%d")),
        ),
        None => (String::new(), String::new()),
    };
    let (kept_start, kept_end) = match view.range {
        Some(range) => (
            date_value(Some(range.start)),
            date_value(Some(range.end)),
        ),
        None => (String::new(), String::new()),
    };

    format!(
        r#"<aside>
<h2>{filter_title}</h2>
<form method="get" action="/">
<input type="hidden" name="lang" value="{other}">
<input type="hidden" name="start_date" value="{kept_start}">
<input type="hidden" name="end_date" value="{kept_end}">
<button type="submit" class="toggle">{toggle_label}</button>
</form>
<form method="get" action="/">
<input type="hidden" name="lang" value="{lang}">
<h3>{date_range}</h3>
<label for="start_date">{start_label}</label>
<input type="date" id="start_date" name="start_date" value="{start}"{min}{max}>
<label for="end_date">{end_label}</label>
<input type="date" id="end_date" name="end_date" value="{end}"{min}{max}>
<button type="submit">{apply}</button>
<a class="reset" href="/?lang={lang}">{reset}</a>
</form>
</aside>"#,
        filter_title = escape(texts.filter_title),
        toggle_label = escape(texts.toggle_label),
        date_range = escape(texts.date_range),
        start_label = escape(texts.start_date),
        end_label = escape(texts.end_date),
        apply = escape(texts.apply),
        reset = escape(texts.reset),
    )
}

fn render_kpis(view: &DashboardView, texts: &Texts) -> String {
    let Some(kpis) = &view.kpis else {
        return format!(r#"<p class="empty">{}</p>"#, escape(texts.no_data));
    };

    let cards: String = kpis
        .cards
        .iter()
        .map(|card| {
            format!(
                r#"<div class="kpi"><div class="label">{}</div><div class="value">{}</div></div>"#,
                escape(&card.label),
                escape(&card.value)
            )
        })
        .collect();

    let note = view.as_of_note.as_deref().unwrap_or_default();
    format!(
        r#"<p class="note">{}</p>
<div class="kpis">{}</div>
<p class="caption">{}</p>"#,
        escape(note),
        cards,
        escape(texts.note)
    )
}

const TABLE_COLUMNS: [&str; 13] = [
    columns::DATE,
    columns::TOTAL_PACKAGES,
    columns::MISROUTED_PACKAGES,
    columns::MACHINE_SORTED,
    columns::JOY_HOURS,
    columns::DELIN_HOURS,
    columns::RAPID_HOURS,
    columns::MB_HOURS,
    columns::PR_HOURS,
    columns::ERROR_RATE,
    columns::TOTAL_HOURS,
    columns::EFFICIENCY,
    columns::MANUAL_SORTED,
];

fn table_row(record: &DailyRecord) -> String {
    let mut cells = vec![
        record.date.format("%Y-%m-%d").to_string(),
        record.total_packages.to_string(),
        record.misrouted_packages.to_string(),
        record.machine_sorted.to_string(),
    ];
    cells.extend(
        Team::ALL
            .iter()
            .map(|team| record.hours_by_team.get(*team).to_string()),
    );
    cells.push(record.excluded_hours.to_string());
    cells.push(format_fixed(record.error_rate_pct, 3));
    cells.push(format_fixed(record.total_hours, 2));
    cells.push(format_fixed(record.efficiency, 2));
    cells.push(record.manual_sorted.to_string());

    let cells: String = cells
        .iter()
        .map(|cell| format!("<td>{}</td>", escape(cell)))
        .collect();
    format!("<tr>{}</tr>", cells)
}

fn render_table(view: &DashboardView, texts: &Texts) -> String {
    let header: String = TABLE_COLUMNS
        .iter()
        .map(|name| format!("<th>{}</th>", escape(name)))
        .collect();
    let rows: String = view.records.iter().map(table_row).collect();

    format!(
        r#"<h2>{}</h2>
<table>
<thead><tr>{}</tr></thead>
<tbody>{}</tbody>
</table>"#,
        escape(texts.data_title),
        header,
        rows
    )
}

/// Serializes the figure for a `<script>` block.
fn figure_json(view: &DashboardView) -> String {
    to_plotly(&view.chart).to_string().replace("</", "<\\/")
}

/// Renders the complete dashboard page for one view.
pub fn render_page(view: &DashboardView) -> String {
    let texts = view.language.texts();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
<script src="{cdn}" charset="utf-8"></script>
</head>
<body>
<div class="layout">
{sidebar}
<main>
<h1>{title}</h1>
{kpis}
<div id="chart"></div>
{table}
</main>
</div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#,
        lang = view.language.code(),
        title = escape(texts.title),
        style = STYLE,
        cdn = PLOTLY_CDN,
        sidebar = render_sidebar(view, texts),
        kpis = render_kpis(view, texts),
        table = render_table(view, texts),
        figure = figure_json(view),
    )
}

/// Minimal page shown when the dashboard cannot be built.
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{status}</title></head>
<body>
<h1>{status}</h1>
<p>{message}</p>
<p><a href="/">&larr; /</a></p>
</body>
</html>
"#,
        status = escape(&status.to_string()),
        message = escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Language;
    use compute::build_dashboard;
    use compute::loader::{load_frame, read_csv_bytes};
    use compute::testing::{FIXTURE_YEAR, TWO_DAY_CSV, date};

    fn view(language: Language, range: Option<DateRange>) -> DashboardView {
        let raw = read_csv_bytes(TWO_DAY_CSV.as_bytes()).unwrap();
        let frame = load_frame(raw, FIXTURE_YEAR).unwrap();
        build_dashboard(frame, range, language).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("工时"), "工时");
    }

    #[test]
    fn test_page_shows_labels_kpis_and_table() {
        let page = render_page(&view(Language::En, None));
        let texts = Language::En.texts();

        assert!(page.contains(texts.title));
        assert!(page.contains("Data as of 2025-03-02"));
        assert!(page.contains(texts.kpi1));
        assert!(page.contains(r#"<div class="value">16.67</div>"#));
        assert!(page.contains(texts.data_title));
        assert!(page.contains("<th>错分率(%)</th>"));
        assert!(page.contains("<td>2025-03-01</td>"));
        assert!(page.contains(PLOTLY_CDN));
        assert!(page.contains(r#"name="lang" value="zh""#));
        assert!(page.contains(r#"min="2025-03-01""#));
        assert!(page.contains(r#"max="2025-03-02""#));
    }

    #[test]
    fn test_toggle_keeps_applied_range() {
        let range = DateRange::new(date(3, 1), date(3, 1));
        let page = render_page(&view(Language::Zh, Some(range)));

        assert!(page.contains(r#"<html lang="zh">"#));
        assert!(page.contains(r#"name="lang" value="en""#));
        assert!(page.contains(r#"name="start_date" value="2025-03-01""#));
        assert!(page.contains(r#"name="end_date" value="2025-03-01""#));
        assert!(page.contains("以下数据为2025-03-01的数据"));
    }

    #[test]
    fn test_empty_range_shows_notice() {
        let range = DateRange::new(date(4, 1), date(4, 30));
        let page = render_page(&view(Language::En, Some(range)));

        assert!(page.contains(Language::En.texts().no_data));
        assert!(!page.contains(r#"class="kpi""#));
        assert!(!page.contains("<td>"));
    }

    #[test]
    fn test_script_cannot_close_early() {
        let json = figure_json(&view(Language::En, None));
        assert!(!json.contains("</"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = render_error_page(StatusCode::INTERNAL_SERVER_ERROR, "<missing>");
        assert!(page.contains("500 Internal Server Error"));
        assert!(page.contains("&lt;missing&gt;"));
    }
}
