//! ConversionError for typed value coercion

use crate::coerce::ValidationDataType;

/// A value could not be parsed into the canonical form of a data type.
///
/// This is an ordinary outcome of [`try_convert`](crate::coerce::try_convert):
/// user input that fails to convert makes a rule report invalid, while a
/// configured bound or comparand that fails to convert is escalated to a
/// [`ConfigError`](super::ConfigError) by the rule itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' cannot be converted to {data_type}")]
pub struct ConversionError {
    /// The formatted text that failed to parse.
    pub value: String,
    /// The type it was parsed as.
    pub data_type: ValidationDataType,
}

impl ConversionError {
    /// Creates a new conversion error.
    pub fn new(value: impl Into<String>, data_type: ValidationDataType) -> Self {
        Self {
            value: value.into(),
            data_type,
        }
    }
}
