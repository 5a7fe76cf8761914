use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The four labeled work teams whose hours count towards total hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Team {
    Joy,
    Delin,
    Rapid,
    Mb,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::Joy, Team::Delin, Team::Rapid, Team::Mb];

    pub fn label(self) -> &'static str {
        match self {
            Team::Joy => "JOY",
            Team::Delin => "DELIN",
            Team::Rapid => "RAPID",
            Team::Mb => "MB",
        }
    }
}

/// Hours worked by each labeled team on one day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct TeamHours {
    pub joy: f64,
    pub delin: f64,
    pub rapid: f64,
    pub mb: f64,
}

impl TeamHours {
    pub fn new(joy: f64, delin: f64, rapid: f64, mb: f64) -> Self {
        Self { joy, delin, rapid, mb }
    }

    pub fn get(&self, team: Team) -> f64 {
        match team {
            Team::Joy => self.joy,
            Team::Delin => self.delin,
            Team::Rapid => self.rapid,
            Team::Mb => self.mb,
        }
    }

    pub fn sum(&self) -> f64 {
        Team::ALL.iter().map(|team| self.get(*team)).sum()
    }
}

/// One day of sorting operations, with the derived metrics attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub total_packages: i64,
    pub misrouted_packages: i64,
    pub machine_sorted: i64,
    pub hours_by_team: TeamHours,
    /// Hours of the unlabeled PR team, never part of `total_hours`.
    pub excluded_hours: f64,
    pub error_rate_pct: f64,
    pub total_hours: f64,
    pub efficiency: f64,
    pub manual_sorted: i64,
}

/// Closed calendar interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    /// First day included (YYYY-MM-DD)
    pub start: NaiveDate,
    /// Last day included (YYYY-MM-DD)
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range only exists when both endpoints were supplied.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self::new(start, end)),
            _ => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}
