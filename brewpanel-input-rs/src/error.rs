//! Error types for the input layer.

use core::fmt;

/// Errors that can occur when reading a physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError<E> {
    /// Underlying pin read error.
    Pin(E),

    /// Active level in a button descriptor was neither 0 (low) nor 1 (high).
    InvalidActiveLevel(u8),
}

impl<E: fmt::Debug> fmt::Display for InputError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::Pin(e) => write!(f, "pin error: {:?}", e),
            InputError::InvalidActiveLevel(level) => {
                write!(f, "invalid active level {} (must be 0 or 1)", level)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for InputError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            InputError::Pin(_) => defmt::write!(f, "Pin error"),
            InputError::InvalidActiveLevel(level) => {
                defmt::write!(f, "Invalid active level {}", level)
            }
        }
    }
}
