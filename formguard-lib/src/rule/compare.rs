use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::{empty_gate, order};
use crate::coerce::{self, ValidationDataType};
use crate::control::Control;
use crate::error::ConfigError;

/// How the value is compared with the comparand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOperator {
    /// Only check that the value converts to the data type.
    DataTypeCheck,
    #[default]
    Equal,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    NotEqual,
}

impl CompareOperator {
    /// Apply the operator to the ordering of value against comparand.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::DataTypeCheck => true,
            Self::Equal => ordering.is_eq(),
            Self::GreaterThan => ordering.is_gt(),
            Self::GreaterThanEqual => ordering.is_ge(),
            Self::LessThan => ordering.is_lt(),
            Self::LessThanEqual => ordering.is_le(),
            Self::NotEqual => ordering.is_ne(),
        }
    }
}

/// What a compare rule compares against.
#[derive(Clone, Default)]
pub enum Comparand {
    #[default]
    None,
    /// A constant.
    Value(String),
    /// The current text of another control.
    Control(Arc<dyn Control>),
}

impl Comparand {
    fn text(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Value(value) if value.is_empty() => None,
            Self::Value(value) => Some(value.clone()),
            Self::Control(control) => Some(control.text()),
        }
    }
}

impl fmt::Debug for Comparand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Control(control) => f.debug_tuple("Control").field(&control.node_id()).finish(),
        }
    }
}

/// Compares the value with a constant or with another control.
#[derive(Debug, Clone)]
pub struct CompareRule {
    pub operator: CompareOperator,
    pub comparand: Comparand,
    pub data_type: ValidationDataType,
    pub required: bool,
}

impl CompareRule {
    pub fn new(operator: CompareOperator) -> Self {
        Self {
            operator,
            comparand: Comparand::None,
            data_type: ValidationDataType::default(),
            required: true,
        }
    }

    /// Compare against a constant.
    pub fn value_to_compare(mut self, value: impl Into<String>) -> Self {
        self.comparand = Comparand::Value(value.into());
        self
    }

    /// Compare against another control's text.
    pub fn control_to_compare(mut self, control: Arc<dyn Control>) -> Self {
        self.comparand = Comparand::Control(control);
        self
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

        let formatted = coerce::format(value.trim(), self.data_type);
        let Ok(value) = coerce::try_convert(&formatted, self.data_type) else {
            return Ok(false);
        };
        if self.operator == CompareOperator::DataTypeCheck {
            return Ok(true);
        }

        let raw = self.comparand.text().ok_or(ConfigError::MissingComparand)?;
        let formatted = coerce::format(raw.trim(), self.data_type);
        let comparand = coerce::try_convert(&formatted, self.data_type)
            .map_err(|_| ConfigError::unconvertible_comparand(raw.trim(), self.data_type))?;

        Ok(self.operator.holds(order(&value, &comparand)?))
    }
}
