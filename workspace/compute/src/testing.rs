//! Shared fixtures for tests in this crate and in the web shell.

use chrono::NaiveDate;
use common::{DailyRecord, TeamHours};

/// Reporting year the fixtures are loaded with.
pub const FIXTURE_YEAR: i32 = 2025;

/// Two days with hand-checkable metrics.
///
/// 03-01: 8 hours, 2.0 % errors, 12.5 pcs/hour, 40 manual.
/// 03-02: 12 hours, 5.0 % errors, 16.667 pcs/hour, 50 manual.
pub const TWO_DAY_CSV: &str = "\
日期,总集包票数,错分票数,分拣机分拣量,JOY工时,DELIN工时,RAPID工时,MB工时,PR工时
03月01日,100,2,60,2,2,2,2,5
03月02日,200,10,150,3,3,3,3,7
";

/// A week of data, deliberately not sorted by date.
pub const WEEK_CSV: &str = "\
日期,总集包票数,错分票数,分拣机分拣量,JOY工时,DELIN工时,RAPID工时,MB工时,PR工时
03月01日,12500,31,9800,20.5,18,16.5,12,6
03月02日,13120,27,10150,21,18.5,17,12.5,6
03月04日,11980,40,9020,19.5,17,16,11,5.5
03月03日,12760,22,9900,20,18,16,12,6
03月05日,14210,35,11300,22.5,19,18,13,7
03月06日,13890,30,11020,22,19,17.5,13,6.5
03月07日,15045,38,12100,23,20,18.5,14,7
";

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(FIXTURE_YEAR, month, day).expect("valid fixture date")
}

/// A record whose four teams each worked `hours_each`, with metrics derived.
pub fn record(date: NaiveDate, total: i64, misrouted: i64, machine: i64, hours_each: f64) -> DailyRecord {
    let hours_by_team = TeamHours::new(hours_each, hours_each, hours_each, hours_each);
    let total_hours = hours_by_team.sum();
    DailyRecord {
        date,
        total_packages: total,
        misrouted_packages: misrouted,
        machine_sorted: machine,
        hours_by_team,
        excluded_hours: 0.0,
        error_rate_pct: misrouted as f64 / total as f64 * 100.0,
        total_hours,
        efficiency: total as f64 / total_hours,
        manual_sorted: total - machine,
    }
}
