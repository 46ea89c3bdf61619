//! Column mapping: which source column feeds which canonical field.
//!
//! The tracking system's export has a fixed layout, but "column index N
//! means field X" is only ever stated here, as data. The mapping is
//! validated once per upload; a too-narrow table is rejected before any row
//! is ingested.

use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::error::{DispatchError, Result};
use crate::input::RawTable;

/// Binds one source column position to a canonical field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColumnBinding {
    /// Zero-based position in the raw table.
    pub position: usize,
    /// The canonical field this column feeds.
    pub field: Field,
    /// Whether a record is dropped when the value cannot be read.
    pub required: bool,
}

impl ColumnBinding {
    pub fn new(position: usize, field: Field, required: bool) -> Self {
        Self {
            position,
            field,
            required,
        }
    }
}

/// The declared source-column layout of an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    bindings: Vec<ColumnBinding>,
}

impl ColumnMapping {
    /// Create a mapping from explicit bindings.
    pub fn new(bindings: Vec<ColumnBinding>) -> Self {
        Self { bindings }
    }

    /// The bindings in declaration order.
    pub fn bindings(&self) -> &[ColumnBinding] {
        &self.bindings
    }

    /// Position of the binding for a field, if mapped.
    pub fn position_of(&self, field: Field) -> Option<usize> {
        self.bindings
            .iter()
            .find(|b| b.field == field)
            .map(|b| b.position)
    }

    /// Minimum table width this mapping requires.
    pub fn required_width(&self) -> usize {
        self.bindings
            .iter()
            .map(|b| b.position + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check a raw table against the mapping.
    ///
    /// Fails with [`DispatchError::Schema`] when the table is narrower than
    /// the highest bound position. Checked once per upload, not per row.
    pub fn validate(&self, raw: &RawTable) -> Result<()> {
        let expected = self.required_width();
        let found = raw.column_count();
        if found < expected {
            return Err(DispatchError::Schema { expected, found });
        }
        Ok(())
    }
}

impl Default for ColumnMapping {
    /// The standard export layout: column 0 is a running number and is
    /// ignored, column 1 is the dispatch date, columns 2-13 hold the
    /// remaining canonical fields in schema order.
    fn default() -> Self {
        Self::new(vec![
            ColumnBinding::new(1, Field::Date, true),
            ColumnBinding::new(2, Field::Line, false),
            ColumnBinding::new(3, Field::Station, false),
            ColumnBinding::new(4, Field::LocationCode, false),
            ColumnBinding::new(5, Field::LocationDesc, false),
            ColumnBinding::new(6, Field::UnitId, false),
            ColumnBinding::new(7, Field::MaterialCode, false),
            ColumnBinding::new(8, Field::MaterialCode2, false),
            ColumnBinding::new(9, Field::MaterialDesc, false),
            ColumnBinding::new(10, Field::Device, false),
            ColumnBinding::new(11, Field::ErrorCode, false),
            ColumnBinding::new(12, Field::ErrorDesc, false),
            ColumnBinding::new(13, Field::Comment, false),
        ])
    }
}
