//! Validation rules.
//!
//! A [`ValidationRule`] is one of five kinds, each with its own parameter
//! struct and evaluator. Every kind except [`RequiredRule`] first passes the
//! value through [`empty_gate`]: blank input is valid unless the rule's
//! `required` flag is set, and the kind-specific check only runs on
//! non-blank input.

mod compare;
mod custom;
mod pattern;
mod range;
mod required;

use std::cmp::Ordering;

use crate::coerce::TypedValue;
use crate::control::Control;
use crate::error::ConfigError;

pub use compare::{Comparand, CompareOperator, CompareRule};
pub use custom::{CustomPredicate, CustomRule};
pub use pattern::PatternRule;
pub use range::RangeRule;
pub use required::RequiredRule;

/// The check a validator applies to its bound control.
#[derive(Debug, Clone)]
pub enum ValidationRule {
    Required(RequiredRule),
    Pattern(PatternRule),
    Range(RangeRule),
    Compare(CompareRule),
    Custom(CustomRule),
}

impl ValidationRule {
    /// Short name of the rule kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Required(_) => "required",
            Self::Pattern(_) => "pattern",
            Self::Range(_) => "range",
            Self::Compare(_) => "compare",
            Self::Custom(_) => "custom",
        }
    }

    /// Evaluate the rule against the control's current text.
    ///
    /// `Ok(false)` means the user's input is invalid. `Err` means the rule
    /// itself is misconfigured.
    pub fn evaluate(&self, control: &dyn Control) -> Result<bool, ConfigError> {
        let value = control.text();
        let result = match self {
            Self::Required(rule) => Ok(rule.evaluate(&value)),
            Self::Pattern(rule) => Ok(rule.evaluate(&value)),
            Self::Range(rule) => rule.evaluate(&value),
            Self::Compare(rule) => rule.evaluate(&value),
            Self::Custom(rule) => Ok(rule.evaluate(&value, control)),
        };
        log::trace!(
            "{} rule on '{}' with {:?} -> {:?}",
            self.kind(),
            control.node_id(),
            value,
            result
        );
        result
    }
}

impl From<RequiredRule> for ValidationRule {
    fn from(rule: RequiredRule) -> Self {
        Self::Required(rule)
    }
}

impl From<PatternRule> for ValidationRule {
    fn from(rule: PatternRule) -> Self {
        Self::Pattern(rule)
    }
}

impl From<RangeRule> for ValidationRule {
    fn from(rule: RangeRule) -> Self {
        Self::Range(rule)
    }
}

impl From<CompareRule> for ValidationRule {
    fn from(rule: CompareRule) -> Self {
        Self::Compare(rule)
    }
}

impl From<CustomRule> for ValidationRule {
    fn from(rule: CustomRule) -> Self {
        Self::Custom(rule)
    }
}

/// Blank-input short-circuit shared by every rule but Required.
///
/// Returns `Some(verdict)` when the trimmed value is empty, `None` when the
/// rule should go on to its own check.
pub fn empty_gate(value: &str, required: bool) -> Option<bool> {
    if value.trim().is_empty() {
        Some(!required)
    } else {
        None
    }
}

/// Order two converted values, rejecting values of different types.
fn order(left: &TypedValue, right: &TypedValue) -> Result<Ordering, ConfigError> {
    left.compare(right)
        .ok_or(ConfigError::IncomparableValues {
            left: left.data_type(),
            right: right.data_type(),
        })
}
