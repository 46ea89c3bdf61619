//! Example: load a dispatch export and print a quick report.
//!
//! Usage:
//!   cargo run --example report -- <file_path>

use std::env;
use std::path::Path;

use dispatchboard::{
    category_counts, daily_counts, filter, kpis, Field, FilterSpec, Session, Window,
};

fn main() -> dispatchboard::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example report -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    if !Path::new(file_path).exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let mut session = Session::new();
    session.load_file(file_path)?;
    let Some(table) = session.table() else {
        return Ok(());
    };

    let separator = "=".repeat(72);
    println!("{}", separator);
    println!("Dispatch report: {}", file_path);
    println!("{}", separator);
    println!();

    if let Some(source) = session.source() {
        println!("## Source");
        println!("  Format: {}", source.format);
        println!("  Raw rows: {}", source.row_count);
        println!("  Records: {}", table.len());
        println!();
    }

    let spec = FilterSpec::select_all(table);
    let view = filter(table, &spec);

    println!("## Top error descriptions");
    for entry in category_counts(&view, Field::ErrorDesc).iter().take(10) {
        println!("  {:40} {}", entry.value, entry.count);
    }
    println!();

    println!("## Dispatches per day");
    for day in daily_counts(&view) {
        println!("  {}  {}", day.date, day.count);
    }
    println!();

    if let Some((from, to)) = table.date_span() {
        let report = kpis(table, &Window::new(from, to));
        println!("## KPIs ({} to {})", from, to);
        println!("  Total: {}", report.total_count);
        println!("  Per day: {:.1}", report.avg_per_day);
        if let Some(line) = &report.top_line {
            println!("  Top line: {} ({})", line, report.top_line_count);
        }
    }

    Ok(())
}
