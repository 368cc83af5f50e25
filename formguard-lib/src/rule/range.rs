use super::{empty_gate, order};
use crate::coerce::{self, TypedValue, ValidationDataType};
use crate::error::{ConfigError, RangeBound};

/// Requires the value to lie between two inclusive bounds.
///
/// Bounds are configuration: a missing, unparsable or inverted pair is a
/// [`ConfigError`]. Input that does not parse as the data type is simply
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRule {
    pub minimum: String,
    pub maximum: String,
    pub data_type: ValidationDataType,
    pub required: bool,
}

impl RangeRule {
    pub fn new(minimum: impl Into<String>, maximum: impl Into<String>) -> Self {
        Self {
            minimum: minimum.into(),
            maximum: maximum.into(),
            data_type: ValidationDataType::default(),
            required: true,
        }
    }

    pub fn data_type(mut self, data_type: ValidationDataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Whether blank input fails.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn evaluate(&self, value: &str) -> Result<bool, ConfigError> {
        if let Some(verdict) = empty_gate(value, self.required) {
            return Ok(verdict);
        }

        let minimum = self.bound(&self.minimum, RangeBound::Minimum)?;
        let maximum = self.bound(&self.maximum, RangeBound::Maximum)?;
        if order(&minimum, &maximum)?.is_gt() {
            return Err(ConfigError::InvertedRange {
                minimum: self.minimum.trim().to_string(),
                maximum: self.maximum.trim().to_string(),
            });
        }

        let formatted = coerce::format(value.trim(), self.data_type);
        let Ok(value) = coerce::try_convert(&formatted, self.data_type) else {
            return Ok(false);
        };

        Ok(order(&minimum, &value)?.is_le() && order(&value, &maximum)?.is_le())
    }

    fn bound(&self, raw: &str, bound: RangeBound) -> Result<TypedValue, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingRangeBound { bound });
        }
        let formatted = coerce::format(raw, self.data_type);
        coerce::try_convert(&formatted, self.data_type)
            .map_err(|_| ConfigError::unconvertible_bound(bound, raw, self.data_type))
    }
}
