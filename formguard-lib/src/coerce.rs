//! Type-aware formatting and conversion for ordered comparisons.
//!
//! Range and compare rules work on text taken from controls. Before two values
//! can be ordered they are stripped of display decoration with [`format`] and
//! parsed into a [`TypedValue`] with [`try_convert`]. Parsing is invariant:
//! `.` is the decimal separator, `,` groups thousands in currency values, and
//! dates are numeric.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConversionError;

/// Characters removed from currency input before parsing.
const CURRENCY_DECORATION: &[char] = &['$', '€', '£', '¥', ','];

/// Accepted numeric date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// The data type a range or compare rule interprets its values as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationDataType {
    /// A monetary amount. Currency symbols and grouping separators are allowed.
    Currency,
    /// A calendar date without a time portion.
    Date,
    /// A double precision floating point number.
    Double,
    /// A 32-bit signed integer.
    Integer,
    /// Plain text, ordered ordinally.
    #[default]
    String,
}

impl std::fmt::Display for ValidationDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Currency => "Currency",
            Self::Date => "Date",
            Self::Double => "Double",
            Self::Integer => "Integer",
            Self::String => "String",
        };
        f.write_str(name)
    }
}

/// A value parsed into the canonical representation of its data type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Currency(Decimal),
    Date(NaiveDate),
    Double(f64),
    Integer(i32),
    String(String),
}

impl TypedValue {
    /// The data type this value was converted as.
    pub fn data_type(&self) -> ValidationDataType {
        match self {
            Self::Currency(_) => ValidationDataType::Currency,
            Self::Date(_) => ValidationDataType::Date,
            Self::Double(_) => ValidationDataType::Double,
            Self::Integer(_) => ValidationDataType::Integer,
            Self::String(_) => ValidationDataType::String,
        }
    }

    /// Order two values of the same data type.
    ///
    /// Returns `None` when the values were converted as different types.
    /// Doubles are always finite here, and `-0` equals `0`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Currency(a), Self::Currency(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Double(a), Self::Double(b)) => a.partial_cmp(b),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Strip display-only decoration from a raw value.
///
/// Currency values lose their currency symbol, whitespace and thousands
/// separators. Every other type is returned unchanged.
pub fn format(raw: &str, data_type: ValidationDataType) -> String {
    match data_type {
        ValidationDataType::Currency => raw
            .chars()
            .filter(|c| !c.is_whitespace() && !CURRENCY_DECORATION.contains(c))
            .collect(),
        _ => raw.to_string(),
    }
}

/// Parse a formatted value into its canonical typed representation.
pub fn try_convert(
    formatted: &str,
    data_type: ValidationDataType,
) -> Result<TypedValue, ConversionError> {
    let text = formatted.trim();
    let fail = || ConversionError::new(formatted, data_type);

    match data_type {
        ValidationDataType::Currency => Decimal::from_str(text)
            .map(TypedValue::Currency)
            .map_err(|_| fail()),
        ValidationDataType::Date => DATE_FORMATS
            .iter()
            .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
            .map(TypedValue::Date)
            .ok_or_else(fail),
        ValidationDataType::Double => f64::from_str(text)
            .ok()
            .filter(|v| v.is_finite())
            .map(TypedValue::Double)
            .ok_or_else(fail),
        ValidationDataType::Integer => i32::from_str(text)
            .map(TypedValue::Integer)
            .map_err(|_| fail()),
        ValidationDataType::String => Ok(TypedValue::String(formatted.to_string())),
    }
}

/// Whether a formatted value converts to the given data type.
pub fn can_convert(formatted: &str, data_type: ValidationDataType) -> bool {
    try_convert(formatted, data_type).is_ok()
}
