//! Error types for the OLED display driver.

use display_interface::DisplayError;

/// Errors that can occur during OLED display operations.
///
/// The `ssd1306` crate wraps all underlying I2C bus errors into
/// [`DisplayError`], so this enum is non-generic.
#[derive(Debug)]
pub enum OledError {
    /// Display interface error (I2C or drawing into the buffer).
    Display(DisplayError),
    /// The controller did not accept the initialisation sequence.
    InitializationFailed,
    /// Drawing or flushing was attempted before
    /// [`OledDriver::init()`](crate::OledDriver::init) succeeded.
    NotInitialized,
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Display(_) => defmt::write!(f, "display interface error"),
            OledError::InitializationFailed => defmt::write!(f, "init rejected"),
            OledError::NotInitialized => defmt::write!(f, "not initialised"),
        }
    }
}
