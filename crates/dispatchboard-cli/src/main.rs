//! Dispatchboard CLI - terminal reporting over repair dispatch exports.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary { file, top, json } => commands::summary::run(file, top, json, cli.verbose),

        Commands::Pivot {
            file,
            rows,
            cols,
            measures,
            aggs,
            totals,
            from,
            to,
            json,
        } => commands::pivot::run(file, rows, cols, measures, aggs, totals, from, to, json),

        Commands::Kpi {
            file,
            from,
            to,
            json,
        } => commands::kpi::run(file, from, to, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
