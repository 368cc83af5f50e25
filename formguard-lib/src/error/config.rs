//! Configuration errors raised while evaluating validators

use crate::coerce::ValidationDataType;

/// Which end of a range is misconfigured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Minimum,
    Maximum,
}

impl std::fmt::Display for RangeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimum => write!(f, "MinimumValue"),
            Self::Maximum => write!(f, "MaximumValue"),
        }
    }
}

/// A validator, rule or container was not set up correctly.
///
/// These are host mistakes, not user-input failures. They abort the
/// `validate()` call that hit them and never change a validator's validity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The validator has no control to read a value from.
    #[error("validator {validator} has no bound control")]
    UnboundControl { validator: String },

    /// A container validator was asked to run without a container.
    #[error("container validator has no container to validate")]
    MissingContainer,

    /// A range bound was left empty.
    #[error("{bound} must be provided")]
    MissingRangeBound { bound: RangeBound },

    /// A range bound does not parse as the declared data type.
    #[error("{bound} '{value}' cannot be converted to {data_type}")]
    UnconvertibleBound {
        bound: RangeBound,
        value: String,
        data_type: ValidationDataType,
    },

    /// The configured minimum is greater than the maximum.
    #[error("MinimumValue '{minimum}' cannot be greater than MaximumValue '{maximum}'")]
    InvertedRange { minimum: String, maximum: String },

    /// A comparison rule has neither a control nor a constant to compare to.
    #[error("compare rule needs a control or a value to compare against")]
    MissingComparand,

    /// The comparand does not parse as the declared data type.
    #[error("comparand '{value}' cannot be converted to {data_type}")]
    UnconvertibleComparand {
        value: String,
        data_type: ValidationDataType,
    },

    /// The regular expression failed to compile.
    #[error("invalid validation expression '{expression}': {reason}")]
    InvalidPattern { expression: String, reason: String },

    /// Two typed values of different data types were compared.
    #[error("cannot compare {left} with {right}")]
    IncomparableValues {
        left: ValidationDataType,
        right: ValidationDataType,
    },
}

impl ConfigError {
    /// Creates an unbound control error for the given validator.
    pub fn unbound(validator: impl std::fmt::Display) -> Self {
        Self::UnboundControl {
            validator: validator.to_string(),
        }
    }

    /// Creates an error for a range bound that failed to convert.
    pub fn unconvertible_bound(
        bound: RangeBound,
        value: impl Into<String>,
        data_type: ValidationDataType,
    ) -> Self {
        Self::UnconvertibleBound {
            bound,
            value: value.into(),
            data_type,
        }
    }

    /// Creates an error for a comparand that failed to convert.
    pub fn unconvertible_comparand(
        value: impl Into<String>,
        data_type: ValidationDataType,
    ) -> Self {
        Self::UnconvertibleComparand {
            value: value.into(),
            data_type,
        }
    }

    /// Creates an invalid pattern error from a regex compile failure.
    pub fn invalid_pattern(expression: impl Into<String>, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            expression: expression.into(),
            reason: err.to_string(),
        }
    }
}
