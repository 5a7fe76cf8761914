//! Column names of the source table and of the derived metrics.
//!
//! The source CSV uses these exact headers; renaming any of them breaks loading.

use common::Team;

pub const DATE: &str = "日期";
pub const TOTAL_PACKAGES: &str = "总集包票数";
pub const MISROUTED_PACKAGES: &str = "错分票数";
pub const MACHINE_SORTED: &str = "分拣机分拣量";
pub const JOY_HOURS: &str = "JOY工时";
pub const DELIN_HOURS: &str = "DELIN工时";
pub const RAPID_HOURS: &str = "RAPID工时";
pub const MB_HOURS: &str = "MB工时";
/// Hours of the unlabeled fifth team, excluded from total hours.
pub const PR_HOURS: &str = "PR工时";

pub const ERROR_RATE: &str = "错分率(%)";
pub const TOTAL_HOURS: &str = "总工时";
pub const EFFICIENCY: &str = "人效(票/小时)";
pub const MANUAL_SORTED: &str = "人工分拣量";

pub const COUNT_COLUMNS: [&str; 3] = [TOTAL_PACKAGES, MISROUTED_PACKAGES, MACHINE_SORTED];
pub const TEAM_HOURS_COLUMNS: [&str; 4] = [JOY_HOURS, DELIN_HOURS, RAPID_HOURS, MB_HOURS];
pub const HOURS_COLUMNS: [&str; 5] = [JOY_HOURS, DELIN_HOURS, RAPID_HOURS, MB_HOURS, PR_HOURS];
pub const DERIVED_COLUMNS: [&str; 4] = [ERROR_RATE, TOTAL_HOURS, EFFICIENCY, MANUAL_SORTED];

/// Source column holding the hours of a labeled team.
pub fn team_hours_column(team: Team) -> &'static str {
    match team {
        Team::Joy => JOY_HOURS,
        Team::Delin => DELIN_HOURS,
        Team::Rapid => RAPID_HOURS,
        Team::Mb => MB_HOURS,
    }
}
