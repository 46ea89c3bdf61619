//! Record normalization: raw export rows into canonical dispatch records.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::Result;
use crate::input::RawTable;
use crate::record::{DispatchRecord, DispatchTable};
use crate::schema::{ColumnMapping, Field};

/// Date-time shapes seen in exports.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Date-only shapes seen in exports.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y"];

/// Day 0 of Excel's serial date numbering.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Maps raw upload rows onto [`DispatchRecord`]s.
///
/// The mapping width is checked once per upload; rows whose date cell does
/// not parse are dropped silently — trailing junk rows are a fact of
/// spreadsheet exports, not an error. All other cells are taken verbatim.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    mapping: ColumnMapping,
}

impl Normalizer {
    /// Create a normalizer for the standard export layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a custom column mapping.
    pub fn with_mapping(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    /// The column mapping in use.
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Normalize a raw table into the canonical table.
    ///
    /// Fails with [`DispatchError::Schema`](crate::DispatchError::Schema)
    /// when the upload is narrower than the mapping requires; in that case
    /// nothing is ingested.
    pub fn normalize(&self, raw: &RawTable) -> Result<DispatchTable> {
        self.mapping.validate(raw)?;

        let mut records = Vec::with_capacity(raw.row_count());
        for row in &raw.rows {
            let Some(timestamp) = self.row_timestamp(row) else {
                continue;
            };

            let cell = |field: Field| -> Option<String> {
                let pos = self.mapping.position_of(field)?;
                row.get(pos).filter(|s| !s.is_empty()).cloned()
            };

            records.push(DispatchRecord {
                timestamp,
                line: cell(Field::Line),
                station: cell(Field::Station),
                location_code: cell(Field::LocationCode),
                location_desc: cell(Field::LocationDesc),
                unit_id: cell(Field::UnitId),
                material_code: cell(Field::MaterialCode),
                material_code_2: cell(Field::MaterialCode2),
                material_desc: cell(Field::MaterialDesc),
                device: cell(Field::Device),
                error_code: cell(Field::ErrorCode),
                error_desc: cell(Field::ErrorDesc),
                comment: cell(Field::Comment),
            });
        }

        Ok(DispatchTable::new(records))
    }

    fn row_timestamp(&self, row: &[String]) -> Option<NaiveDateTime> {
        let pos = self.mapping.position_of(Field::Date)?;
        parse_date_cell(row.get(pos)?)
    }
}

/// Parse a date cell: known date-time and date formats, then Excel serial
/// day numbers (the export writes those when the workbook is saved as text
/// without cell formatting).
pub fn parse_date_cell(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(cell, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    parse_excel_serial(cell)
}

fn parse_excel_serial(cell: &str) -> Option<NaiveDateTime> {
    let serial: f64 = cell.parse().ok()?;
    if !(1.0..200_000.0).contains(&serial) {
        return None;
    }

    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
    let days = serial.floor() as i64;
    let secs = ((serial - serial.floor()) * 86_400.0).round() as i64;
    Some(epoch + Duration::days(days) + Duration::seconds(secs))
}
