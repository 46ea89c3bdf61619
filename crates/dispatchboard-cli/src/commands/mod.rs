//! Command implementations.

pub mod kpi;
pub mod pivot;
pub mod summary;

use std::path::Path;

use dispatchboard::Session;

/// Load an export into a fresh session, with the existence check every
/// command wants first.
pub fn load_session(file: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut session = Session::new();
    session.load_file(file)?;
    Ok(session)
}

/// Render a missing categorical value in tables.
pub fn label(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "(missing)".to_string())
}
