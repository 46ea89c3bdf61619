//! Aggregation engine: generalized pivot computation.
//!
//! Groups a record view by row-key and column-key tuples, aggregates one or
//! more measures with one or more aggregation functions, and synthesizes an
//! optional total row. Group order is the first-appearance order of the
//! underlying data, so identical input order reproduces identical output.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::record::DispatchRecord;
use crate::schema::Field;

/// Label of the synthesized total row.
pub const TOTAL_LABEL: &str = "Celkem";

/// A grouping key: one slot per key field, `None` for a missing value.
/// Missing is a category of its own; it is never folded into a default.
pub type KeyTuple = Vec<Option<String>>;

/// Supported aggregation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregator {
    /// Number of records in the group.
    Count,
    /// Arithmetic sum over the numeric readings of the measure.
    Sum,
    /// Arithmetic mean over the numeric readings; 0 for an empty group.
    Mean,
}

impl Aggregator {
    pub fn name(self) -> &'static str {
        match self {
            Aggregator::Count => "count",
            Aggregator::Sum => "sum",
            Aggregator::Mean => "mean",
        }
    }
}

/// Description of a pivot computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotSpec {
    /// Fields keying the output rows, outer to inner.
    pub row_keys: Vec<Field>,
    /// Fields keying the output columns; empty means a single implicit
    /// column.
    pub column_keys: Vec<Field>,
    /// Measure fields; empty means the implicit record count.
    pub measures: Vec<Field>,
    /// Aggregation functions, applied to every measure.
    pub aggregators: Vec<Aggregator>,
    /// Whether to append the synthesized total row.
    pub include_totals: bool,
}

impl PivotSpec {
    /// A count pivot over one row dimension, the most common request.
    pub fn count_by(row_key: Field) -> Self {
        Self {
            row_keys: vec![row_key],
            column_keys: Vec::new(),
            measures: Vec::new(),
            aggregators: vec![Aggregator::Count],
            include_totals: false,
        }
    }
}

/// One output column: a (measure, aggregator, column-key-tuple) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotColumn {
    /// The measure, or `None` for the implicit record count.
    pub measure: Option<Field>,
    pub aggregator: Aggregator,
    /// The column-key tuple; empty when the spec has no column keys.
    pub key: KeyTuple,
}

/// One output row: a row-key tuple and one cell per output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub key: KeyTuple,
    pub cells: Vec<f64>,
    /// Set on the synthesized total row.
    pub is_total: bool,
}

/// The dense pivot grid: every observed row tuple crossed with every
/// observed column tuple, absent combinations filled with 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PivotResult {
    pub columns: Vec<PivotColumn>,
    pub rows: Vec<PivotRow>,
}

impl PivotResult {
    /// The data rows, excluding the synthesized total.
    pub fn data_rows(&self) -> impl Iterator<Item = &PivotRow> {
        self.rows.iter().filter(|r| !r.is_total)
    }

    /// The synthesized total row, when requested.
    pub fn total_row(&self) -> Option<&PivotRow> {
        self.rows.iter().find(|r| r.is_total)
    }
}

#[derive(Clone)]
struct MeasureAccum {
    sum: f64,
    numeric_count: usize,
}

struct GroupAccum {
    count: usize,
    measures: Vec<MeasureAccum>,
}

impl GroupAccum {
    fn new(measure_slots: usize) -> Self {
        Self {
            count: 0,
            measures: vec![
                MeasureAccum {
                    sum: 0.0,
                    numeric_count: 0
                };
                measure_slots
            ],
        }
    }

    fn eval(&self, slot: usize, aggregator: Aggregator) -> f64 {
        let m = &self.measures[slot];
        match aggregator {
            Aggregator::Count => self.count as f64,
            Aggregator::Sum => m.sum,
            Aggregator::Mean => {
                if m.numeric_count == 0 {
                    0.0
                } else {
                    m.sum / m.numeric_count as f64
                }
            }
        }
    }
}

fn key_of(record: &DispatchRecord, fields: &[Field]) -> KeyTuple {
    fields
        .iter()
        .map(|f| record.value(*f).map(|v| v.into_owned()))
        .collect()
}

/// Compute a pivot over a record view (normally the filter engine's
/// output). Total over well-typed input: degenerate specs and empty views
/// yield a well-formed, possibly empty grid.
pub fn aggregate(records: &[&DispatchRecord], spec: &PivotSpec) -> PivotResult {
    // `None` is the implicit record-count measure used when no measure
    // fields were chosen.
    let measures: Vec<Option<Field>> = if spec.measures.is_empty() {
        vec![None]
    } else {
        spec.measures.iter().copied().map(Some).collect()
    };

    let mut col_index: IndexSet<KeyTuple> = IndexSet::new();
    let mut groups: IndexMap<KeyTuple, IndexMap<KeyTuple, GroupAccum>> = IndexMap::new();

    for record in records {
        let row_key = key_of(record, &spec.row_keys);
        let col_key = key_of(record, &spec.column_keys);
        col_index.insert(col_key.clone());

        let acc = groups
            .entry(row_key)
            .or_default()
            .entry(col_key)
            .or_insert_with(|| GroupAccum::new(measures.len()));
        acc.count += 1;
        for (slot, measure) in measures.iter().enumerate() {
            if let Some(value) = measure.and_then(|m| record.numeric_value(m)) {
                acc.measures[slot].sum += value;
                acc.measures[slot].numeric_count += 1;
            }
        }
    }

    // Output columns: the full measure x aggregator x column-tuple cross
    // product, column tuples in first-appearance order.
    let mut columns = Vec::new();
    let mut column_slots = Vec::new();
    for (slot, measure) in measures.iter().enumerate() {
        for &aggregator in &spec.aggregators {
            for col_key in &col_index {
                columns.push(PivotColumn {
                    measure: *measure,
                    aggregator,
                    key: col_key.clone(),
                });
                column_slots.push(slot);
            }
        }
    }

    let mut rows: Vec<PivotRow> = groups
        .iter()
        .map(|(row_key, cols)| {
            let cells = columns
                .iter()
                .zip(&column_slots)
                .map(|(column, &slot)| {
                    cols.get(&column.key)
                        .map_or(0.0, |acc| acc.eval(slot, column.aggregator))
                })
                .collect();
            PivotRow {
                key: row_key.clone(),
                cells,
                is_total: false,
            }
        })
        .collect();

    if spec.include_totals && !rows.is_empty() {
        // A rollup of the cells above, not a recomputed aggregate.
        let mut totals = vec![0.0; columns.len()];
        for row in &rows {
            for (total, cell) in totals.iter_mut().zip(&row.cells) {
                *total += cell;
            }
        }
        rows.push(PivotRow {
            key: vec![Some(TOTAL_LABEL.to_string()); spec.row_keys.len().max(1)],
            cells: totals,
            is_total: true,
        });
    }

    PivotResult { columns, rows }
}
