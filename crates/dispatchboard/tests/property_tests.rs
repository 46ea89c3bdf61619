//! Property-based tests for the dispatchboard pipeline.
//!
//! These tests use proptest to generate random tables and specs and verify
//! that the core stages maintain their invariants under all conditions:
//!
//! 1. **No panics**: every stage is total over well-typed input
//! 2. **Determinism**: same input always produces same output
//! 3. **Conjunction**: filtering is exactly the AND of its predicates
//! 4. **Consistency**: pivot totals reconcile with record counts

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use dispatchboard::{
    aggregate, filter, kpis, Aggregator, DispatchRecord, DispatchTable, Field, FilterSpec,
    PivotSpec, Window,
};

// =============================================================================
// Test Strategies
// =============================================================================

const LINES: &[&str] = &["L01", "L02", "L03", "L01 ", "l02"];
const CODES: &[&str] = &["A", "B", "C", "17"];
const DEVICES: &[&str] = &["ROB-1", "ROB-2"];
const LOCATIONS: &[&str] = &["Montage", "Lackierung"];
const DESCS: &[&str] = &["Sensor defekt", "Kabelbruch"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// An optional categorical value drawn from a small pool (None = missing).
fn arb_value(pool: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        4 => prop::sample::select(pool.to_vec()).prop_map(|s| Some(s.to_string())),
    ]
}

fn arb_record() -> impl Strategy<Value = DispatchRecord> {
    (
        0i64..28,
        arb_value(LINES),
        arb_value(CODES),
        arb_value(DEVICES),
        arb_value(LOCATIONS),
        arb_value(DESCS),
    )
        .prop_map(|(day, line, error_code, device, location_desc, error_desc)| {
            let timestamp = (base_date() + Duration::days(day))
                .and_hms_opt(6, 0, 0)
                .unwrap();
            DispatchRecord {
                timestamp,
                line,
                station: None,
                location_code: None,
                location_desc,
                unit_id: None,
                material_code: None,
                material_code_2: None,
                material_desc: None,
                device,
                error_code,
                error_desc,
                comment: None,
            }
        })
}

fn arb_table() -> impl Strategy<Value = DispatchTable> {
    prop::collection::vec(arb_record(), 0..60).prop_map(DispatchTable::new)
}

/// A random subset of a pool, as an allowed set.
fn arb_allowed(pool: &'static [&'static str]) -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set(
        prop::sample::select(pool.to_vec()).prop_map(str::to_string),
        0..=pool.len(),
    )
}

fn arb_filter_spec() -> impl Strategy<Value = FilterSpec> {
    (
        prop::option::of(0i64..28),
        prop::option::of(0i64..28),
        arb_allowed(LINES),
        arb_allowed(CODES),
        arb_allowed(DEVICES),
        arb_allowed(LOCATIONS),
        arb_allowed(DESCS),
    )
        .prop_map(
            |(from, to, lines, error_codes, devices, location_descs, error_descs)| FilterSpec {
                date_from: from.map(|d| base_date() + Duration::days(d)),
                date_to: to.map(|d| base_date() + Duration::days(d)),
                lines,
                error_codes,
                devices,
                location_descs,
                error_descs,
            },
        )
}

fn arb_key_fields() -> impl Strategy<Value = Vec<Field>> {
    prop::collection::vec(
        prop::sample::select(vec![
            Field::Date,
            Field::Line,
            Field::Device,
            Field::ErrorCode,
            Field::ErrorDesc,
        ]),
        0..3,
    )
}

fn arb_pivot_spec() -> impl Strategy<Value = PivotSpec> {
    (
        arb_key_fields(),
        arb_key_fields(),
        prop::collection::vec(
            prop::sample::select(vec![Field::ErrorCode, Field::UnitId]),
            0..2,
        ),
        prop::collection::vec(
            prop::sample::select(vec![Aggregator::Count, Aggregator::Sum, Aggregator::Mean]),
            1..3,
        ),
        any::<bool>(),
    )
        .prop_map(
            |(row_keys, column_keys, measures, aggregators, include_totals)| PivotSpec {
                row_keys,
                column_keys,
                measures,
                aggregators,
                include_totals,
            },
        )
}

// =============================================================================
// Filter Properties
// =============================================================================

proptest! {
    /// A record is in the output iff it independently satisfies every
    /// predicate group.
    #[test]
    fn filter_is_exact_conjunction(table in arb_table(), spec in arb_filter_spec()) {
        let view = filter(&table, &spec);
        let expected: Vec<&DispatchRecord> = table
            .iter()
            .filter(|r| {
                let date_ok = spec.date_from.is_none_or(|from| r.date() >= from)
                    && spec.date_to.is_none_or(|to| r.date() <= to);
                let member = |set: &HashSet<String>, v: &Option<String>| {
                    v.as_ref().map(|v| set.contains(v)).unwrap_or(false)
                };
                date_ok
                    && member(&spec.lines, &r.line)
                    && member(&spec.error_codes, &r.error_code)
                    && member(&spec.devices, &r.device)
                    && member(&spec.location_descs, &r.location_desc)
                    && member(&spec.error_descs, &r.error_desc)
            })
            .collect();
        prop_assert_eq!(view, expected);
    }

    /// Widening one allowed set never removes a passing record; the wider
    /// result is a superset of the narrower one, in the same order.
    #[test]
    fn filter_is_monotone_in_allowed_sets(
        table in arb_table(),
        spec in arb_filter_spec(),
        extra in prop::sample::select(LINES.to_vec()),
    ) {
        let narrow = filter(&table, &spec);

        let mut wide_spec = spec.clone();
        wide_spec.lines.insert(extra.to_string());
        let wide = filter(&table, &wide_spec);

        let mut wide_iter = wide.iter();
        for record in &narrow {
            prop_assert!(wide_iter.any(|w| std::ptr::eq(*w, *record)));
        }
    }

    /// select_all is the widest categorical selection: every record with
    /// all five dimensions present passes it.
    #[test]
    fn select_all_passes_complete_records(table in arb_table()) {
        let spec = FilterSpec::select_all(&table);
        let view = filter(&table, &spec);
        let complete = table
            .iter()
            .filter(|r| {
                r.line.is_some()
                    && r.error_code.is_some()
                    && r.device.is_some()
                    && r.location_desc.is_some()
                    && r.error_desc.is_some()
            })
            .count();
        prop_assert_eq!(view.len(), complete);
    }
}

// =============================================================================
// Pivot Properties
// =============================================================================

proptest! {
    /// With the count aggregator and no column keys, row counts sum to the
    /// number of records.
    #[test]
    fn pivot_counts_sum_to_record_count(table in arb_table(), key in prop::sample::select(vec![
        Field::Line,
        Field::ErrorCode,
        Field::Device,
    ])) {
        let result = aggregate(&table.view(), &PivotSpec::count_by(key));
        let sum: f64 = result.data_rows().map(|r| r.cells[0]).sum();
        prop_assert_eq!(sum as usize, table.len());
    }

    /// The synthesized total row is the column-wise sum of the data rows.
    #[test]
    fn pivot_total_row_is_column_sum(table in arb_table(), spec in arb_pivot_spec()) {
        let mut spec = spec;
        spec.include_totals = true;
        let result = aggregate(&table.view(), &spec);

        if let Some(total) = result.total_row() {
            for (col, cell) in total.cells.iter().enumerate() {
                let sum: f64 = result.data_rows().map(|r| r.cells[col]).sum();
                prop_assert!((cell - sum).abs() < 1e-9);
            }
        } else {
            prop_assert!(result.rows.is_empty());
        }
    }

    /// Every cell is finite: empty groups report 0, never NaN or a hole,
    /// and every row spans every column.
    #[test]
    fn pivot_grid_is_dense_and_finite(table in arb_table(), spec in arb_pivot_spec()) {
        let result = aggregate(&table.view(), &spec);
        for row in &result.rows {
            prop_assert_eq!(row.cells.len(), result.columns.len());
            for cell in &row.cells {
                prop_assert!(cell.is_finite());
            }
        }
    }

    /// Identical input order reproduces identical output.
    #[test]
    fn pivot_is_deterministic(table in arb_table(), spec in arb_pivot_spec()) {
        let a = aggregate(&table.view(), &spec);
        let b = aggregate(&table.view(), &spec);
        prop_assert_eq!(a.rows, b.rows);
        prop_assert_eq!(a.columns, b.columns);
    }
}

// =============================================================================
// KPI Properties
// =============================================================================

proptest! {
    /// The previous window tiles exactly against the current one: same
    /// length, ending the day before the current window starts.
    #[test]
    fn kpi_previous_window_tiles(from in 0i64..365, len in 0i64..60) {
        let start = base_date() + Duration::days(from);
        let window = Window::new(start, start + Duration::days(len));
        let previous = window.previous();

        prop_assert_eq!(previous.days(), window.days());
        prop_assert_eq!(previous.to + Duration::days(1), window.from);
    }

    /// KPI totals never exceed the table size, and the delta reconciles
    /// with the two window totals.
    #[test]
    fn kpi_totals_reconcile(table in arb_table(), from in 0i64..28, len in 0i64..14) {
        let start = base_date() + Duration::days(from);
        let window = Window::new(start, start + Duration::days(len));
        let report = kpis(&table, &window);

        prop_assert!(report.total_count <= table.len());
        let previous = window.previous();
        let previous_total = table
            .iter()
            .filter(|r| previous.contains(r.date()))
            .count() as i64;
        prop_assert_eq!(
            report.delta_vs_previous,
            report.total_count as i64 - previous_total
        );
    }
}
