//! Filter engine: conjunction of per-dimension predicates.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{DispatchRecord, DispatchTable};
use crate::schema::Field;

/// An ordered borrowed view of records, as produced by [`filter`].
pub type RecordView<'a> = Vec<&'a DispatchRecord>;

/// The user's current selection: an inclusive date range plus one allowed
/// set per filterable categorical dimension.
///
/// A record passes when its date lies within the bounds and every
/// categorical value is a member of the matching set. The sets are
/// exhaustive selections, not opt-in extras: an empty set passes nothing
/// (the degenerate but valid "select nothing" state), and a record missing
/// a value cannot be a member of any selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive lower date bound (None = open).
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound (None = open).
    pub date_to: Option<NaiveDate>,
    pub lines: HashSet<String>,
    pub error_codes: HashSet<String>,
    pub devices: HashSet<String>,
    pub location_descs: HashSet<String>,
    pub error_descs: HashSet<String>,
}

impl FilterSpec {
    /// The sidebar's initial state: every observed value of every dimension
    /// selected, date bounds spanning the whole table.
    pub fn select_all(table: &DispatchTable) -> Self {
        let collect = |field: Field| table.distinct_values(field).into_iter().collect();
        let (date_from, date_to) = match table.date_span() {
            Some((lo, hi)) => (Some(lo), Some(hi)),
            None => (None, None),
        };

        Self {
            date_from,
            date_to,
            lines: collect(Field::Line),
            error_codes: collect(Field::ErrorCode),
            devices: collect(Field::Device),
            location_descs: collect(Field::LocationDesc),
            error_descs: collect(Field::ErrorDesc),
        }
    }

    /// Whether a single record satisfies every predicate.
    pub fn matches(&self, record: &DispatchRecord) -> bool {
        let date = record.date();
        if self.date_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| date > to) {
            return false;
        }

        allowed(&self.lines, &record.line)
            && allowed(&self.error_codes, &record.error_code)
            && allowed(&self.devices, &record.device)
            && allowed(&self.location_descs, &record.location_desc)
            && allowed(&self.error_descs, &record.error_desc)
    }
}

fn allowed(set: &HashSet<String>, value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| set.contains(v))
}

/// Apply a filter to the table, preserving input order.
///
/// Pure and total: empty tables, empty selections and open date bounds all
/// flow through without caller special-casing.
pub fn filter<'a>(table: &'a DispatchTable, spec: &FilterSpec) -> RecordView<'a> {
    table.iter().filter(|r| spec.matches(r)).collect()
}
