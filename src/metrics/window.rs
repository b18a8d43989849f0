use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Serialize, Serializer};

use crate::errors::VulnpulseError;

/// Year-qualified ISO week identifier.
///
/// Bare week numbers repeat every year, so a window spanning a year
/// boundary would alias week 1 of one year with week 1 of the next.
/// Qualifying with the ISO week-based year keeps every identifier unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekId {
    year: i32,
    week: u32,
}

impl WeekId {
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Period string the metrics endpoint expects, e.g. "2026-W31".
    pub fn period(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{}", self.year, self.week)
    }
}

impl Serialize for WeekId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The fixed, ordered range of reporting weeks for one report run.
///
/// Built once per run; every downstream structure resolves a week to an
/// array position through [`WeekWindow::position`] instead of scanning.
#[derive(Debug, Clone)]
pub struct WeekWindow {
    weeks: Vec<WeekId>,
    period_starts: Vec<NaiveDate>,
    positions: HashMap<WeekId, usize>,
}

impl WeekWindow {
    /// Builds `scope` weeks oldest-first, ending at the most recently
    /// fully-completed week before `today`.
    pub fn build(scope: usize, today: NaiveDate) -> Result<Self, VulnpulseError> {
        if scope == 0 {
            return Err(VulnpulseError::Config(
                "report scope must be at least 1 week".into(),
            ));
        }

        let mut weeks = Vec::with_capacity(scope);
        let mut period_starts = Vec::with_capacity(scope);
        let mut positions = HashMap::with_capacity(scope);

        for recency in (1..=scope).rev() {
            let date = today - Duration::weeks(recency as i64);
            let week = WeekId::from_date(date);
            let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
            debug_assert!(!positions.contains_key(&week), "duplicate week in window");
            positions.insert(week, weeks.len());
            weeks.push(week);
            period_starts.push(start);
        }

        Ok(Self {
            weeks,
            period_starts,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn weeks(&self) -> &[WeekId] {
        &self.weeks
    }

    /// Monday of each week in the window, aligned with `weeks()`.
    pub fn period_starts(&self) -> &[NaiveDate] {
        &self.period_starts
    }

    pub fn position(&self, week: WeekId) -> Option<usize> {
        self.positions.get(&week).copied()
    }

    pub fn first(&self) -> WeekId {
        self.weeks[0]
    }

    pub fn last(&self) -> WeekId {
        self.weeks[self.weeks.len() - 1]
    }
}
