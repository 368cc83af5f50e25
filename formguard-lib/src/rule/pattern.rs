use regex::Regex;

use super::empty_gate;
use crate::error::ConfigError;

/// Requires the whole value to match a regular expression.
///
/// The leftmost match of the expression must span the entire trimmed value;
/// a match of only part of the value fails.
#[derive(Debug, Clone)]
pub struct PatternRule {
    expression: String,
    regex: Regex,
    required: bool,
}

impl PatternRule {
    /// Compile `expression` into a new rule. Blank input fails by default.
    pub fn new(expression: impl Into<String>) -> Result<Self, ConfigError> {
        let expression = expression.into();
        let regex = compile(&expression)?;
        Ok(Self {
            expression,
            regex,
            required: true,
        })
    }

    /// Whether blank input fails.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Replace the expression. The rule is unchanged if it fails to compile.
    pub fn set_expression(&mut self, expression: impl Into<String>) -> Result<(), ConfigError> {
        let expression = expression.into();
        self.regex = compile(&expression)?;
        self.expression = expression;
        Ok(())
    }

    pub fn evaluate(&self, value: &str) -> bool {
        if let Some(verdict) = empty_gate(value, self.required) {
            return verdict;
        }
        let value = value.trim();
        self.regex
            .find(value)
            .is_some_and(|m| m.as_str() == value)
    }
}

fn compile(expression: &str) -> Result<Regex, ConfigError> {
    Regex::new(expression.trim()).map_err(|e| ConfigError::invalid_pattern(expression, &e))
}
