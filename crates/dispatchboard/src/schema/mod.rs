//! Canonical schema: field names and the column mapping of the export.

mod field;
mod mapping;

pub use field::Field;
pub use mapping::{ColumnBinding, ColumnMapping};
