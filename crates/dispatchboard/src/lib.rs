//! Dispatchboard: reporting core for repair dispatch exports.
//!
//! Dispatchboard turns a spreadsheet export of repair dispatch records into
//! filtered views, pivot summaries and period KPIs. The pipeline is a chain
//! of pure stages over an in-memory table:
//!
//! raw upload → [`Normalizer`] → [`DispatchTable`] → [`filter`] →
//! [`aggregate`] / [`kpis`] / derived views.
//!
//! # Core Principles
//!
//! - **One-shot ingestion**: each upload replaces the table wholesale.
//! - **Verbatim categories**: cell values are never trimmed or case-folded;
//!   distinct-looking strings are distinct categories.
//! - **Total downstream stages**: given a valid table, every filter, pivot
//!   and KPI computation produces a well-formed (possibly empty) result.
//!
//! # Example
//!
//! ```no_run
//! use dispatchboard::{FilterSpec, Session};
//!
//! let mut session = Session::new();
//! let table = session.load_file("dispatches.csv").unwrap();
//!
//! let spec = FilterSpec::select_all(table);
//! let view = dispatchboard::filter(table, &spec);
//! println!("{} of {} records selected", view.len(), table.len());
//! ```

pub mod error;
pub mod filter;
pub mod input;
pub mod kpi;
pub mod normalize;
pub mod pivot;
pub mod record;
pub mod schema;
pub mod views;

mod session;

pub use error::{DispatchError, Result};
pub use filter::{filter, FilterSpec, RecordView};
pub use input::{Parser, ParserConfig, RawTable, SourceMetadata};
pub use kpi::{kpis, KpiReport, Window};
pub use normalize::Normalizer;
pub use pivot::{aggregate, Aggregator, PivotColumn, PivotResult, PivotRow, PivotSpec, TOTAL_LABEL};
pub use record::{DispatchRecord, DispatchTable};
pub use schema::{ColumnBinding, ColumnMapping, Field};
pub use session::{Session, SessionConfig};
pub use views::{category_counts, daily_counts, pareto, CategoryCount, DailyCount, ParetoEntry};
