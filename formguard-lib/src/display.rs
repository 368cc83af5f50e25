//! Error indicator hints handed to the error display.

use serde::Deserialize;
use serde::Serialize;

use crate::control::Control;

/// Where the error icon sits relative to the control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconAlignment {
    TopLeft,
    TopRight,
    MiddleLeft,
    /// Vertically centred, right of the control (default).
    #[default]
    MiddleRight,
    BottomLeft,
    BottomRight,
}

/// Whether the error icon blinks when shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlinkStyle {
    /// Blink only when the message changes.
    BlinkIfDifferentError,
    AlwaysBlink,
    #[default]
    NeverBlink,
}

/// Presentation hints that travel with an error message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorHints {
    pub alignment: IconAlignment,
    /// Extra space between the control and the icon.
    pub padding: i32,
    pub blink: BlinkStyle,
}

impl ErrorHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(mut self, alignment: IconAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn blink(mut self, blink: BlinkStyle) -> Self {
        self.blink = blink;
        self
    }
}

/// Shows or clears the error indicator next to a control.
///
/// An empty `message` clears the indicator. Implementations are purely
/// presentational; validity is owned by the validator.
pub trait ErrorProvider: Send + Sync {
    fn set_error(&self, control: &dyn Control, message: &str, hints: &ErrorHints);
}
