//! Aggregation performance benchmarks.
//!
//! Measures the filter and pivot stages over synthetic tables of
//! increasing size.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispatchboard::{
    aggregate, filter, Aggregator, DispatchRecord, DispatchTable, Field, FilterSpec, PivotSpec,
};

/// Generate a synthetic table with a realistic category spread.
fn generate_table(rows: usize) -> DispatchTable {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = (0..rows)
        .map(|i| DispatchRecord {
            timestamp: (base + Duration::days((i % 90) as i64))
                .and_hms_opt((i % 24) as u32, 0, 0)
                .unwrap(),
            line: Some(format!("L{:02}", i % 6)),
            station: Some(format!("P{:02}", i % 12)),
            location_code: Some(format!("S{}", i % 9)),
            location_desc: Some(format!("Bereich {}", i % 9)),
            unit_id: Some(format!("{}", i)),
            material_code: Some(format!("M{:03}", i % 40)),
            material_code_2: None,
            material_desc: Some(format!("Teil {}", i % 40)),
            device: Some(format!("ROB-{}", i % 4)),
            error_code: Some(format!("E{:02}", i % 15)),
            error_desc: Some(format!("Fehlerbild {}", i % 15)),
            comment: None,
        })
        .collect();
    DispatchTable::new(records)
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for rows in [1_000, 10_000, 50_000].iter() {
        let table = generate_table(*rows);
        let spec = FilterSpec::select_all(&table);

        group.bench_with_input(BenchmarkId::new("select_all", rows), &table, |b, table| {
            b.iter(|| black_box(filter(table, &spec)))
        });
    }

    group.finish();
}

fn bench_count_pivot(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_pivot");

    for rows in [1_000, 10_000, 50_000].iter() {
        let table = generate_table(*rows);
        let view = table.view();
        let spec = PivotSpec::count_by(Field::ErrorCode);

        group.bench_with_input(BenchmarkId::new("one_key", rows), &view, |b, view| {
            b.iter(|| black_box(aggregate(view, &spec)))
        });
    }

    group.finish();
}

fn bench_cross_tab(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_tab");

    let table = generate_table(50_000);
    let view = table.view();
    let spec = PivotSpec {
        row_keys: vec![Field::Station, Field::Line],
        column_keys: vec![Field::ErrorCode],
        measures: vec![Field::UnitId],
        aggregators: vec![Aggregator::Count, Aggregator::Sum, Aggregator::Mean],
        include_totals: true,
    };

    group.bench_function("two_keys_three_aggs", |b| {
        b.iter(|| black_box(aggregate(&view, &spec)))
    });

    group.finish();
}

criterion_group!(benches, bench_filter, bench_count_pivot, bench_cross_tab);
criterion_main!(benches);
