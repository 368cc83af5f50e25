/// Fails while the control still holds its initial value.
///
/// With the default empty initial value this is a plain "must not be blank"
/// check. With a placeholder such as `"0"` or `"(select)"` the user must
/// change the value away from the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredRule {
    pub initial_value: String,
}

impl RequiredRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value the control starts out with.
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn evaluate(&self, value: &str) -> bool {
        value.trim() != self.initial_value.trim()
    }
}
