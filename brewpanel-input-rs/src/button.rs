//! Hardware boundary: one physical button on a digital input pin.

use embedded_hal::digital::InputPin;

use crate::error::InputError;
use crate::ButtonId;

/// Electrical level at which a button counts as pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pushed pulls the pin low (pull-up wiring).
    Low,
    /// Pushed drives the pin high (pull-down wiring).
    High,
}

impl TryFrom<u8> for ActiveLevel {
    type Error = u8;

    /// Accepts the conventional `0` (low) / `1` (high) encoding used in pin
    /// configuration tables; any other value is returned as the error.
    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(ActiveLevel::Low),
            1 => Ok(ActiveLevel::High),
            other => Err(other),
        }
    }
}

/// A physical button: an input pin plus the level that means "pushed".
///
/// Wraps any `embedded-hal` [`InputPin`] and reports the raw active state
/// aligned to the configured [`ActiveLevel`]. No debouncing happens here;
/// feed the result to an [`InputDebouncer`](crate::InputDebouncer) or an
/// [`InputPanel`](crate::InputPanel).
///
/// # Example
///
/// ```no_run
/// use brewpanel_input::{ActiveLevel, ButtonId, ButtonPin};
///
/// # fn example(pin: impl embedded_hal::digital::InputPin) {
/// let mut left = ButtonPin::new(ButtonId::Left, pin, ActiveLevel::Low);
/// let raw = left.is_active(); // Some(true) while pushed, None on read error
/// # }
/// ```
pub struct ButtonPin<P> {
    id: ButtonId,
    level: ActiveLevel,
    pin: P,
}

impl<P> ButtonPin<P>
where
    P: InputPin,
{
    /// Create a button from an already-validated active level.
    pub fn new(id: ButtonId, pin: P, level: ActiveLevel) -> Self {
        Self { id, level, pin }
    }

    /// Create a button from a raw configuration descriptor.
    ///
    /// # Errors
    /// * [`InputError::InvalidActiveLevel`] if `level` is not 0 or 1. The
    ///   pin is dropped and no button is created.
    pub fn from_descriptor(id: ButtonId, pin: P, level: u8) -> Result<Self, InputError<P::Error>> {
        let level = ActiveLevel::try_from(level).map_err(InputError::InvalidActiveLevel)?;
        Ok(Self::new(id, pin, level))
    }

    /// Identity of this button.
    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Configured active level.
    pub fn active_level(&self) -> ActiveLevel {
        self.level
    }

    /// Read the pin and report whether the button is currently pushed.
    ///
    /// # Errors
    /// * [`InputError::Pin`] if the pin read fails.
    pub fn read_active(&mut self) -> Result<bool, InputError<P::Error>> {
        let high = self.pin.is_high().map_err(InputError::Pin)?;
        Ok(match self.level {
            ActiveLevel::High => high,
            ActiveLevel::Low => !high,
        })
    }

    /// Like [`read_active()`](Self::read_active), but maps a read failure
    /// to `None` after logging it.
    ///
    /// `None` is what [`InputPanel::tick_checked()`](crate::InputPanel::tick_checked)
    /// expects for an unreadable input.
    pub fn is_active(&mut self) -> Option<bool> {
        match self.read_active() {
            Ok(active) => Some(active),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("button {} unreadable", self.id);
                None
            }
        }
    }

    /// Release the underlying pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Pin double with a settable level and failure mode.
    struct FakePin {
        high: bool,
        fail: bool,
    }

    impl ErrorType for FakePin {
        type Error = ErrorKind;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            if self.fail {
                Err(ErrorKind::Other)
            } else {
                Ok(self.high)
            }
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|h| !h)
        }
    }

    #[test]
    fn active_low_inverts_pin_level() {
        let mut button = ButtonPin::new(
            ButtonId::Left,
            FakePin { high: false, fail: false },
            ActiveLevel::Low,
        );
        assert_eq!(button.is_active(), Some(true));

        let mut pin = button.into_inner();
        pin.high = true;
        let mut button = ButtonPin::new(ButtonId::Left, pin, ActiveLevel::Low);
        assert_eq!(button.is_active(), Some(false));
    }

    #[test]
    fn active_high_follows_pin_level() {
        let mut button = ButtonPin::new(
            ButtonId::Right,
            FakePin { high: true, fail: false },
            ActiveLevel::High,
        );
        assert_eq!(button.read_active(), Ok(true));
        assert_eq!(button.id(), ButtonId::Right);
        assert_eq!(button.active_level(), ActiveLevel::High);
    }

    #[test]
    fn descriptor_with_valid_levels() {
        let low = ButtonPin::from_descriptor(ButtonId::Left, FakePin { high: false, fail: false }, 0);
        assert_eq!(low.ok().map(|b| b.active_level()), Some(ActiveLevel::Low));

        let high = ButtonPin::from_descriptor(ButtonId::Left, FakePin { high: false, fail: false }, 1);
        assert_eq!(high.ok().map(|b| b.active_level()), Some(ActiveLevel::High));
    }

    #[test]
    fn descriptor_with_invalid_level_is_rejected() {
        let result = ButtonPin::from_descriptor(ButtonId::Left, FakePin { high: false, fail: false }, 7);
        assert!(matches!(result, Err(InputError::InvalidActiveLevel(7))));
    }

    #[test]
    fn read_failure_is_reported_as_none() {
        let mut button = ButtonPin::new(
            ButtonId::Left,
            FakePin { high: false, fail: true },
            ActiveLevel::Low,
        );
        assert_eq!(button.read_active(), Err(InputError::Pin(ErrorKind::Other)));
        assert_eq!(button.is_active(), None);
    }
}
