//! Session context: the owner of the current canonical table.

use std::path::Path;

use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::normalize::Normalizer;
use crate::record::DispatchTable;
use crate::schema::ColumnMapping;

/// Configuration for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Column mapping of the expected export layout.
    pub mapping: ColumnMapping,
}

/// One user's reporting session.
///
/// Owns at most one [`DispatchTable`]; a successful load replaces it
/// wholesale, a failed load reports the error and leaves the previous
/// table untouched. Pages share data by sharing the session, never through
/// process-wide state, so concurrent sessions stay isolated.
pub struct Session {
    parser: Parser,
    normalizer: Normalizer,
    table: Option<DispatchTable>,
    source: Option<SourceMetadata>,
}

impl Session {
    /// Create a session for the standard export layout.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with custom parser and mapping configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            normalizer: Normalizer::with_mapping(config.mapping),
            table: None,
            source: None,
        }
    }

    /// Load an export from disk, replacing the current table on success.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&DispatchTable> {
        let (raw, source) = self.parser.parse_file(path)?;
        let table = self.normalizer.normalize(&raw)?;
        self.source = Some(source);
        Ok(self.table.insert(table))
    }

    /// Load uploaded bytes, replacing the current table on success.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&DispatchTable> {
        let (raw, source) = self.parser.parse_upload(bytes, None)?;
        let table = self.normalizer.normalize(&raw)?;
        self.source = Some(source);
        Ok(self.table.insert(table))
    }

    /// The current table, when an upload has been loaded.
    pub fn table(&self) -> Option<&DispatchTable> {
        self.table.as_ref()
    }

    /// Metadata of the current upload.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_line(nr: usize, date: &str, line: &str, code: &str) -> String {
        format!("{nr};{date};{line};ST-1;SO-1;Hala A;F{nr:04};M-1;;Popis;ROB-1;{code};{code} popis;\n")
    }

    fn export(rows: &[(usize, &str, &str, &str)]) -> Vec<u8> {
        let mut data =
            String::from("Nr;Datum;Linie;PPlatz;Storort;Storort Popis;Fab Nr;Material Nr;Material Nr 2;Material Popis;Zarizeni;Fehler;Fehler Popis;Komentar\n");
        for (nr, date, line, code) in rows {
            data.push_str(&export_line(*nr, date, line, code));
        }
        data.into_bytes()
    }

    #[test]
    fn test_load_bytes_replaces_wholesale() {
        let mut session = Session::new();
        session
            .load_bytes(&export(&[(1, "2024-03-10", "L01", "A")]))
            .unwrap();
        assert_eq!(session.table().unwrap().len(), 1);

        session
            .load_bytes(&export(&[
                (1, "2024-03-11", "L02", "B"),
                (2, "2024-03-12", "L02", "B"),
            ]))
            .unwrap();

        let table = session.table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].line.as_deref(), Some("L02"));
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let mut session = Session::new();
        session
            .load_bytes(&export(&[(1, "2024-03-10", "L01", "A")]))
            .unwrap();

        let err = session.load_bytes(b"a;b;c\n1;2;3\n").unwrap_err();
        assert!(matches!(err, crate::DispatchError::Schema { .. }));

        let table = session.table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].line.as_deref(), Some("L01"));
    }

    #[test]
    fn test_empty_session() {
        let session = Session::new();
        assert!(session.table().is_none());
        assert!(session.source().is_none());
    }
}
