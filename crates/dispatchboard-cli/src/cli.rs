//! CLI argument definitions using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use dispatchboard::Aggregator;
use std::path::PathBuf;

/// Dispatchboard: reporting over repair dispatch exports
#[derive(Parser)]
#[command(name = "dispatchboard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print an overview of an export: lines, top errors, Pareto
    Summary {
        /// Path to the export (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// How many entries per leaderboard
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Emit JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Compute a pivot table over chosen fields
    Pivot {
        /// Path to the export (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Row key fields (e.g. "line,error_desc")
        #[arg(short, long, value_delimiter = ',', default_value = "line")]
        rows: Vec<String>,

        /// Column key fields
        #[arg(short, long, value_delimiter = ',')]
        cols: Vec<String>,

        /// Measure fields
        #[arg(short, long, value_delimiter = ',')]
        measures: Vec<String>,

        /// Aggregation functions
        #[arg(short, long, value_delimiter = ',', default_value = "count")]
        aggs: Vec<AggChoice>,

        /// Append the "Celkem" total row
        #[arg(long)]
        totals: bool,

        /// Only include dispatches on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only include dispatches on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Emit JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Compute period KPIs with a previous-period comparison
    Kpi {
        /// Path to the export (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Window start (YYYY-MM-DD, default: earliest dispatch)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Window end (YYYY-MM-DD, default: latest dispatch)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Emit JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

/// Aggregation choice on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AggChoice {
    Count,
    Sum,
    Mean,
}

impl From<AggChoice> for Aggregator {
    fn from(choice: AggChoice) -> Self {
        match choice {
            AggChoice::Count => Aggregator::Count,
            AggChoice::Sum => Aggregator::Sum,
            AggChoice::Mean => Aggregator::Mean,
        }
    }
}
