//! Pivot command - a pivot table over user-chosen fields.

use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use dispatchboard::{
    aggregate, filter, Field, FilterSpec, PivotColumn, PivotResult, PivotSpec,
};
use tabled::{builder::Builder, settings::Style};

use crate::cli::AggChoice;

fn parse_fields(names: &[String]) -> Result<Vec<Field>, Box<dyn std::error::Error>> {
    names
        .iter()
        .map(|n| n.parse::<Field>().map_err(Into::into))
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    rows: Vec<String>,
    cols: Vec<String>,
    measures: Vec<String>,
    aggs: Vec<AggChoice>,
    totals: bool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = PivotSpec {
        row_keys: parse_fields(&rows)?,
        column_keys: parse_fields(&cols)?,
        measures: parse_fields(&measures)?,
        aggregators: aggs.into_iter().map(Into::into).collect(),
        include_totals: totals,
    };

    let session = super::load_session(&file)?;
    let table = session.table().ok_or("no table loaded")?;

    let mut filter_spec = FilterSpec::select_all(table);
    if from.is_some() {
        filter_spec.date_from = from;
    }
    if to.is_some() {
        filter_spec.date_to = to;
    }
    let view = filter(table, &filter_spec);

    let result = aggregate(&view, &spec);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} ({} of {} records)",
        "Pivot".cyan().bold(),
        file.display().to_string().white(),
        view.len(),
        table.len()
    );
    println!();

    if result.rows.is_empty() {
        println!("(no rows)");
        return Ok(());
    }

    print_grid(&spec, &result);
    Ok(())
}

fn column_label(column: &PivotColumn) -> String {
    let mut parts = Vec::new();
    if let Some(measure) = column.measure {
        parts.push(measure.to_string());
    }
    parts.push(column.aggregator.name().to_string());
    for slot in &column.key {
        parts.push(slot.clone().unwrap_or_else(|| "(missing)".to_string()));
    }
    parts.join(" / ")
}

/// Format a cell without trailing noise: counts and sums of integers print
/// as integers, means keep their fraction.
fn cell_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn print_grid(spec: &PivotSpec, result: &PivotResult) {
    let mut builder = Builder::default();

    let mut header: Vec<String> = if spec.row_keys.is_empty() {
        vec![String::new()]
    } else {
        spec.row_keys.iter().map(|f| f.to_string()).collect()
    };
    header.extend(result.columns.iter().map(column_label));
    builder.push_record(header);

    for row in &result.rows {
        let mut cells: Vec<String> = if row.key.is_empty() {
            vec![String::new()]
        } else {
            row.key.iter().map(super::label).collect()
        };
        cells.extend(row.cells.iter().map(|c| cell_label(*c)));
        builder.push_record(cells);
    }

    println!("{}", builder.build().with(Style::markdown()));
}
