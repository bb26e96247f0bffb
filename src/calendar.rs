//! Contribution calendar types and the fixed-shape grid built from them.
//!
//! The remote calendar is ragged: the first and last weeks usually hold fewer
//! than seven days. [`normalize`] turns it into a rectangular `W x 7` grid
//! indexed by weekday (Monday = 0).
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    /// `YYYY-MM-DD`, kept verbatim so a bad entry can be skipped instead of
    /// failing the whole response.
    pub date: String,
    pub contribution_count: u32,
}

/// Seven daily counts, Monday first.
pub type WeekRow = [u32; DAYS_PER_WEEK];

/// Rectangular `weeks x 7` grid of daily counts, oldest week first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<WeekRow>,
}

impl Grid {
    pub fn from_rows(rows: Vec<WeekRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub fn weeks(&self) -> usize {
        self.rows.len()
    }
}

/// Build a `weeks x 7` grid from the most recent `weeks` calendar weeks.
///
/// When the calendar holds fewer weeks than requested, the missing older
/// weeks are zero rows at the front. Days with an unparseable date are
/// skipped and leave their slot at zero.
pub fn normalize(calendar: &ContributionCalendar, weeks: usize) -> Grid {
    let available = calendar.weeks.len();
    let recent = &calendar.weeks[available.saturating_sub(weeks)..];
    let mut rows = vec![[0u32; DAYS_PER_WEEK]; weeks - recent.len()];

    for week in recent {
        let mut row = [0u32; DAYS_PER_WEEK];
        for day in &week.contribution_days {
            match weekday_index(&day.date) {
                Some(index) => row[index] = day.contribution_count,
                None => {
                    tracing::warn!(date = %day.date, "skipping contribution day with unparseable date");
                }
            }
        }
        rows.push(row);
    }

    if available < weeks {
        tracing::debug!(available, requested = weeks, "calendar shorter than window; padded");
    }
    Grid::from_rows(rows)
}

fn weekday_index(date: &str) -> Option<usize> {
    let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    Some(parsed.weekday().num_days_from_monday() as usize)
}
