//! Error types for the dispatchboard library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dispatchboard operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Uploaded table is too narrow for the column mapping. Fatal for the
    /// whole upload; no rows are ingested.
    #[error("Schema mismatch: expected at least {expected} columns, found {found}")]
    Schema { expected: usize, found: usize },

    /// Empty file or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A pivot or chart axis name that does not resolve to a canonical field.
    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dispatchboard operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
