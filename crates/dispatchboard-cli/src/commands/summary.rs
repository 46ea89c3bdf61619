//! Summary command - overview tables for one export.

use std::path::PathBuf;

use colored::Colorize;
use dispatchboard::{category_counts, daily_counts, filter, pareto, Field, FilterSpec};
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled, Clone)]
struct CountRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled, Clone)]
struct ParetoRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Cumulative %")]
    cumulative_pct: String,
}

pub fn run(
    file: PathBuf,
    top: usize,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session(&file)?;
    let table = session.table().ok_or("no table loaded")?;

    let spec = FilterSpec::select_all(table);
    let view = filter(table, &spec);

    let lines = category_counts(&view, Field::Line);
    let errors = category_counts(&view, Field::ErrorDesc);
    let devices = category_counts(&view, Field::Device);
    let locations = pareto(&view, Field::LocationDesc);

    if json {
        let payload = json!({
            "source": session.source(),
            "records": table.len(),
            "lines": lines,
            "top_errors": errors.iter().take(top).collect::<Vec<_>>(),
            "top_devices": devices.iter().take(top).collect::<Vec<_>>(),
            "location_pareto": locations,
            "daily": daily_counts(&view),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Loaded".cyan().bold(),
        file.display().to_string().white()
    );
    if let Some(source) = session.source() {
        println!(
            "{} records ({} raw rows, format {})",
            table.len().to_string().white().bold(),
            source.row_count,
            source.format
        );
    }
    if let Some((from, to)) = table.date_span() {
        println!("Period {} to {}", from, to);
    }
    println!();

    print_counts("Dispatches per line", &lines, lines.len());
    print_counts("Top error descriptions", &errors, top);
    print_counts("Top devices", &devices, top);

    println!("{}", "Location Pareto".yellow().bold());
    let rows: Vec<ParetoRow> = locations
        .iter()
        .map(|p| ParetoRow {
            value: p.value.clone(),
            count: p.count,
            cumulative_pct: format!("{:.1}", p.cumulative_pct),
        })
        .collect();
    print_table(&rows);

    if verbose {
        println!("{}", "Dispatches per day".yellow().bold());
        let rows: Vec<CountRow> = daily_counts(&view)
            .iter()
            .map(|d| CountRow {
                value: d.date.to_string(),
                count: d.count,
            })
            .collect();
        print_table(&rows);
    }

    Ok(())
}

fn print_counts(title: &str, counts: &[dispatchboard::CategoryCount], top: usize) {
    println!("{}", title.yellow().bold());
    let rows: Vec<CountRow> = counts
        .iter()
        .take(top)
        .map(|c| CountRow {
            value: c.value.clone(),
            count: c.count,
        })
        .collect();
    print_table(&rows);
}

fn print_table<T: Tabled + Clone>(rows: &[T]) {
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    println!("{}\n", Table::new(rows.to_vec()).with(Style::markdown()));
}
