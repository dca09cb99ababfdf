//! Error types for menu construction.

use core::fmt;

/// Errors that can occur while registering menu lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// The menu already holds [`MAX_MENU_LINES`](crate::MAX_MENU_LINES) lines.
    TooManyLines,
    /// Step size is zero, negative or not finite.
    InvalidStep,
    /// Label is longer than [`MAX_LABEL_LEN`](crate::MAX_LABEL_LEN) bytes.
    LabelTooLong,
    /// The parameter already has a line.
    DuplicateParam,
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MenuError::TooManyLines => write!(f, "menu line capacity exceeded"),
            MenuError::InvalidStep => write!(f, "step size must be finite and positive"),
            MenuError::LabelTooLong => write!(f, "label too long"),
            MenuError::DuplicateParam => write!(f, "parameter already bound to a line"),
        }
    }
}
