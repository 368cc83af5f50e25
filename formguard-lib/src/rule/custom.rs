use std::fmt;
use std::sync::Arc;

use super::empty_gate;
use crate::control::Control;

/// Host-supplied check. Receives the current text and the bound control.
pub type CustomPredicate = Arc<dyn Fn(&str, &dyn Control) -> bool + Send + Sync>;

/// Delegates the verdict to a host callback.
#[derive(Clone)]
pub struct CustomRule {
    predicate: Option<CustomPredicate>,
    pub required: bool,
}

impl CustomRule {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str, &dyn Control) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Some(Arc::new(predicate)),
            required: true,
        }
    }

    /// A rule with no callback yet. Non-blank input fails until one is set.
    pub fn unset() -> Self {
        Self {
            predicate: None,
            required: true,
        }
    }

    /// Whether blank input fails.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn set_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&str, &dyn Control) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn evaluate(&self, value: &str, control: &dyn Control) -> bool {
        if let Some(verdict) = empty_gate(value, self.required) {
            return verdict;
        }
        match &self.predicate {
            Some(predicate) => predicate(value, control),
            None => {
                log::warn!(
                    "custom rule on '{}' has no predicate, reporting invalid",
                    control.node_id()
                );
                false
            }
        }
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .field("required", &self.required)
            .finish()
    }
}
