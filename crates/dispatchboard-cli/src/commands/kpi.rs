//! Kpi command - period figures with a previous-period comparison.

use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use dispatchboard::{daily_counts, filter, kpis, FilterSpec, Window};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled, Clone)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Count")]
    count: usize,
}

pub fn run(
    file: PathBuf,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session(&file)?;
    let table = session.table().ok_or("no table loaded")?;

    let (span_from, span_to) = table
        .date_span()
        .ok_or("the export contains no dated records")?;
    let window = Window::new(from.unwrap_or(span_from), to.unwrap_or(span_to));
    let report = kpis(table, &window);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} to {} ({} days)",
        "Period".cyan().bold(),
        window.from,
        window.to,
        report.days_in_period
    );
    println!();

    let delta = match report.delta_pct_vs_previous {
        Some(pct) => format!("{:+} ({:+.1}%)", report.delta_vs_previous, pct),
        None => format!("{:+}", report.delta_vs_previous),
    };
    let delta = if report.delta_vs_previous > 0 {
        // More dispatches than last period is the bad direction here.
        delta.red()
    } else {
        delta.green()
    };

    println!(
        "Total dispatches:  {} {}",
        report.total_count.to_string().white().bold(),
        delta
    );
    println!("Average per day:   {:.1}", report.avg_per_day);
    match &report.top_line {
        Some(line) => println!(
            "Busiest line:      {} ({} dispatches)",
            line.white().bold(),
            report.top_line_count
        ),
        None => println!("Busiest line:      -"),
    }
    println!("Average per line:  {:.1}", report.avg_per_line);

    if verbose {
        let mut spec = FilterSpec::select_all(table);
        spec.date_from = Some(window.from);
        spec.date_to = Some(window.to);
        let view = filter(table, &spec);

        println!();
        println!("{}", "Trend".yellow().bold());
        let rows: Vec<DayRow> = daily_counts(&view)
            .iter()
            .map(|d| DayRow {
                date: d.date.to_string(),
                count: d.count,
            })
            .collect();
        if rows.is_empty() {
            println!("(no rows)");
        } else {
            println!("{}", Table::new(rows).with(Style::markdown()));
        }
    }

    Ok(())
}
