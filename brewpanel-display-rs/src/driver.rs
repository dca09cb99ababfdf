//! SSD1306 driver in async buffered graphics mode.
//!
//! [`OledDriver`] separates construction (no bus traffic) from the async
//! initialisation sequence, and renders whole [`MenuFrame`]s into the
//! frame buffer before a flush.

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async};

use brewpanel_menu::MenuFrame;

use crate::error::OledError;
use crate::layout::{render_menu, DisplayConfig};

/// Standard SSD1306 I2C address.
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Concrete display type used internally by [`OledDriver`].
type Display<I2C> =
    Ssd1306Async<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsModeAsync<DisplaySize128x64>>;

/// Async driver for the panel's SSD1306 128×64 OLED over I2C.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`]: no I2C traffic.
/// 2. [`OledDriver::init()`]: sends the initialisation sequence.
/// 3. [`OledDriver::draw()`]: renders a frame into the buffer (no I2C).
/// 4. [`OledDriver::flush()`]: transfers the buffer to the panel.
///
/// # Example
///
/// ```no_run
/// use brewpanel_display::{DisplayConfig, OledDriver};
/// use brewpanel_menu::MenuFrame;
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().await.unwrap();
/// oled.draw(&MenuFrame::default(), &DisplayConfig::default()).unwrap();
/// oled.flush().await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    display: Display<I2C>,
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver at the 7-bit `address`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self {
            display,
            initialized: false,
        }
    }

    /// Send the SSD1306 initialisation sequence. Call once before drawing.
    ///
    /// # Errors
    /// * [`OledError::InitializationFailed`] if the panel does not respond.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.display
            .init()
            .await
            .map_err(|_| OledError::InitializationFailed)?;
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Clear the frame buffer and render `frame` into it.
    ///
    /// Nothing reaches the panel until [`flush()`](Self::flush). A hidden
    /// frame leaves the buffer blank.
    ///
    /// # Errors
    /// * [`OledError::NotInitialized`] before a successful [`init()`](Self::init).
    pub fn draw(&mut self, frame: &MenuFrame, config: &DisplayConfig) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.clear_buffer();
        render_menu(&mut self.display, frame, config)?;
        Ok(())
    }

    /// Transfer the frame buffer to the panel (about 20 ms at 400 kHz).
    ///
    /// # Errors
    /// * [`OledError::NotInitialized`] before a successful [`init()`](Self::init).
    /// * [`OledError::Display`] on a bus-level failure.
    pub async fn flush(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.flush().await?;
        Ok(())
    }
}
