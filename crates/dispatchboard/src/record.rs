//! Canonical dispatch records and the in-memory table.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::schema::Field;

/// One normalized repair dispatch.
///
/// Only the timestamp is guaranteed; every other field may be absent.
/// Values are verbatim export cells — never trimmed or case-folded, so
/// strings differing in whitespace or case are distinct categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Dispatch timestamp. The calendar date drives filtering and grouping;
    /// the time of day is retained for display.
    pub timestamp: NaiveDateTime,
    pub line: Option<String>,
    pub station: Option<String>,
    pub location_code: Option<String>,
    pub location_desc: Option<String>,
    pub unit_id: Option<String>,
    pub material_code: Option<String>,
    pub material_code_2: Option<String>,
    pub material_desc: Option<String>,
    pub device: Option<String>,
    pub error_code: Option<String>,
    pub error_desc: Option<String>,
    pub comment: Option<String>,
}

impl DispatchRecord {
    /// The calendar date of the dispatch.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Dynamic accessor used by pivot axes and chart dimensions.
    ///
    /// [`Field::Date`] yields the calendar date (`YYYY-MM-DD`) so that
    /// grouping by date matches the daily series.
    pub fn value(&self, field: Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Date => Some(Cow::Owned(self.date().to_string())),
            Field::Line => self.line.as_deref().map(Cow::Borrowed),
            Field::Station => self.station.as_deref().map(Cow::Borrowed),
            Field::LocationCode => self.location_code.as_deref().map(Cow::Borrowed),
            Field::LocationDesc => self.location_desc.as_deref().map(Cow::Borrowed),
            Field::UnitId => self.unit_id.as_deref().map(Cow::Borrowed),
            Field::MaterialCode => self.material_code.as_deref().map(Cow::Borrowed),
            Field::MaterialCode2 => self.material_code_2.as_deref().map(Cow::Borrowed),
            Field::MaterialDesc => self.material_desc.as_deref().map(Cow::Borrowed),
            Field::Device => self.device.as_deref().map(Cow::Borrowed),
            Field::ErrorCode => self.error_code.as_deref().map(Cow::Borrowed),
            Field::ErrorDesc => self.error_desc.as_deref().map(Cow::Borrowed),
            Field::Comment => self.comment.as_deref().map(Cow::Borrowed),
        }
    }

    /// Numeric reading of a field, for sum/mean measures. Non-numeric and
    /// missing values read as `None` and stay out of the aggregate.
    pub fn numeric_value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Date => None,
            _ => self.value(field)?.trim().parse::<f64>().ok(),
        }
    }
}

/// The canonical table: all valid records of one upload, in input order.
///
/// Immutable once produced; a re-upload replaces it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchTable {
    records: Vec<DispatchRecord>,
}

impl DispatchTable {
    /// Create a table from normalized records.
    pub fn new(records: Vec<DispatchRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in input order.
    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, DispatchRecord> {
        self.records.iter()
    }

    /// Borrowed view of every record, for the aggregation entry points that
    /// normally consume filter output.
    pub fn view(&self) -> Vec<&DispatchRecord> {
        self.records.iter().collect()
    }

    /// Distinct observed values of a field, in first-appearance order.
    /// Missing values are not enumerated; they are a filter state, not an
    /// offered choice.
    pub fn distinct_values(&self, field: Field) -> Vec<String> {
        let mut seen: IndexSet<String> = IndexSet::new();
        for record in &self.records {
            if let Some(value) = record.value(field) {
                seen.insert(value.into_owned());
            }
        }
        seen.into_iter().collect()
    }

    /// Earliest and latest dispatch date, when the table is non-empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date();
        let span = self.records.iter().skip(1).fold((first, first), |(lo, hi), r| {
            let d = r.date();
            (lo.min(d), hi.max(d))
        });
        Some(span)
    }
}

impl<'a> IntoIterator for &'a DispatchTable {
    type Item = &'a DispatchRecord;
    type IntoIter = std::slice::Iter<'a, DispatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
