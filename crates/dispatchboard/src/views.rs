//! Derived views: the data series behind the dashboard charts.
//!
//! All views take a record view so they share the filter engine's
//! semantics; whatever passes the sidebar filters is what the charts see.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::DispatchRecord;
use crate::schema::Field;

/// Frequency of one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Dispatches on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// One bar of a Pareto chart: category frequency plus the running share of
/// the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoEntry {
    pub value: String,
    pub count: usize,
    pub cumulative_pct: f64,
}

/// Count records per category of a field, most frequent first.
///
/// Records missing the field are not a category here (the bar and pie
/// charts plot observed values only); ties keep first-appearance order.
pub fn category_counts(records: &[&DispatchRecord], field: Field) -> Vec<CategoryCount> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        if let Some(value) = record.value(field) {
            *counts.entry(value.into_owned()).or_insert(0) += 1;
        }
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount { value, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Count records per calendar day, ascending by date.
pub fn daily_counts(records: &[&DispatchRecord]) -> Vec<DailyCount> {
    let mut counts: IndexMap<NaiveDate, usize> = IndexMap::new();
    for record in records {
        *counts.entry(record.date()).or_insert(0) += 1;
    }

    let mut out: Vec<DailyCount> = counts
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();
    out.sort_by_key(|d| d.date);
    out
}

/// Pareto analysis of a field: descending category counts with cumulative
/// percentage of the total. The last entry reaches 100 whenever any value
/// was observed.
pub fn pareto(records: &[&DispatchRecord], field: Field) -> Vec<ParetoEntry> {
    let counts = category_counts(records, field);
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut running = 0usize;
    counts
        .into_iter()
        .map(|c| {
            running += c.count;
            ParetoEntry {
                value: c.value,
                count: c.count,
                cumulative_pct: running as f64 / total as f64 * 100.0,
            }
        })
        .collect()
}
