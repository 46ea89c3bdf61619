//! The canonical fields of a dispatch record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// A canonical field of a [`DispatchRecord`](crate::DispatchRecord).
///
/// Pivot axes and chart dimensions are chosen at runtime by name; this enum
/// is the lookup table that resolves those names to record accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Line,
    Station,
    LocationCode,
    LocationDesc,
    UnitId,
    MaterialCode,
    MaterialCode2,
    MaterialDesc,
    Device,
    ErrorCode,
    ErrorDesc,
    Comment,
}

impl Field {
    /// All canonical fields in schema order.
    pub const ALL: [Field; 13] = [
        Field::Date,
        Field::Line,
        Field::Station,
        Field::LocationCode,
        Field::LocationDesc,
        Field::UnitId,
        Field::MaterialCode,
        Field::MaterialCode2,
        Field::MaterialDesc,
        Field::Device,
        Field::ErrorCode,
        Field::ErrorDesc,
        Field::Comment,
    ];

    /// The stable snake_case name used in specs, CLI arguments and JSON.
    pub fn name(self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Line => "line",
            Field::Station => "station",
            Field::LocationCode => "location_code",
            Field::LocationDesc => "location_desc",
            Field::UnitId => "unit_id",
            Field::MaterialCode => "material_code",
            Field::MaterialCode2 => "material_code_2",
            Field::MaterialDesc => "material_desc",
            Field::Device => "device",
            Field::ErrorCode => "error_code",
            Field::ErrorDesc => "error_desc",
            Field::Comment => "comment",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| DispatchError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field() {
        let err = "fehler".parse::<Field>().unwrap_err();
        assert!(matches!(err, DispatchError::UnknownField(name) if name == "fehler"));
    }
}
