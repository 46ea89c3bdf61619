//! Period KPIs with a comparison against the preceding window.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::DispatchTable;

/// An inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Window {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Inclusive day count; 1 for a single-day window.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// The contiguous window of identical length ending the day before
    /// this one starts.
    pub fn previous(&self) -> Window {
        Window {
            from: self.from - Duration::days(self.days()),
            to: self.from - Duration::days(1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Key figures for one window, compared against the preceding window of
/// equal length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiReport {
    /// Dispatches inside the window.
    pub total_count: usize,
    /// Inclusive day count of the window.
    pub days_in_period: i64,
    /// Dispatches per day.
    pub avg_per_day: f64,
    /// Production line with the most dispatches, if any line was seen.
    pub top_line: Option<String>,
    /// Dispatch count of the top line.
    pub top_line_count: usize,
    /// Mean dispatches per observed line.
    pub avg_per_line: f64,
    /// Current total minus the previous window's total.
    pub delta_vs_previous: i64,
    /// Percentage change against the previous window; absent when the
    /// previous window saw nothing (no divide-by-zero).
    pub delta_pct_vs_previous: Option<f64>,
}

/// Compute the KPI report for a window.
///
/// The comparison window is evaluated against the same full table: KPIs
/// track raw dispatch volume regardless of any categorical filters applied
/// elsewhere.
pub fn kpis(table: &DispatchTable, window: &Window) -> KpiReport {
    let total_count = table.iter().filter(|r| window.contains(r.date())).count();
    let days_in_period = window.days();
    let avg_per_day = if days_in_period > 0 {
        total_count as f64 / days_in_period as f64
    } else {
        0.0
    };

    // Per-line leaderboard in first-appearance order; ties go to the line
    // seen first. Records without a line stay out of the leaderboard.
    let mut line_counts: IndexMap<&str, usize> = IndexMap::new();
    for record in table.iter().filter(|r| window.contains(r.date())) {
        if let Some(line) = record.line.as_deref() {
            *line_counts.entry(line).or_insert(0) += 1;
        }
    }
    let mut top: Option<(&str, usize)> = None;
    for (line, count) in &line_counts {
        if top.is_none_or(|(_, best)| *count > best) {
            top = Some((*line, *count));
        }
    }
    let (top_line, top_line_count) = top
        .map(|(line, count)| (Some(line.to_string()), count))
        .unwrap_or((None, 0));
    let avg_per_line = if line_counts.is_empty() {
        0.0
    } else {
        line_counts.values().sum::<usize>() as f64 / line_counts.len() as f64
    };

    let previous = window.previous();
    let previous_total = table.iter().filter(|r| previous.contains(r.date())).count();
    let delta_vs_previous = total_count as i64 - previous_total as i64;
    let delta_pct_vs_previous = (previous_total > 0)
        .then(|| delta_vs_previous as f64 / previous_total as f64 * 100.0);

    KpiReport {
        total_count,
        days_in_period,
        avg_per_day,
        top_line,
        top_line_count,
        avg_per_line,
        delta_vs_previous,
        delta_pct_vs_previous,
    }
}
