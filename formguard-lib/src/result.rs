/// Information about a single validator that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Validator ID.
    pub validator_id: String,
    /// ID of the bound control (for focusing).
    pub control_id: String,
    /// Configured error message.
    pub message: String,
}

/// Result of validating a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All in-scope validators passed.
    #[default]
    Valid,
    /// One or more validators failed.
    Invalid {
        /// Failures in registry scan order.
        errors: Vec<FieldError>,
        /// Control that was asked to take focus.
        focused: String,
    },
}

impl ValidationResult {
    /// Check if all validators passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any validator failed.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid { errors, .. } => errors,
        }
    }

    /// Get the control that received focus (if any).
    pub fn focused_control(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { focused, .. } => Some(focused),
        }
    }
}
