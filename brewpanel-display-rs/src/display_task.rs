//! Periodic menu redraw loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embedded_hal_async::i2c::I2c;

use brewpanel_menu::{FrameChanges, MenuFrame};

use crate::driver::OledDriver;
use crate::layout::DisplayConfig;

/// Redraw the panel whenever the shared [`MenuFrame`] changes.
///
/// This is a regular `async fn`, not an Embassy `#[task]`; wrap it in a
/// concrete task since Embassy tasks cannot be generic.
///
/// # Control flow
///
/// 1. Initialise the display hardware.
/// 2. Every `config.update_period_ms()`:
///    - clone the frame (mutex held only for the copy);
///    - skip if [`FrameChanges::detect`] reports nothing;
///    - render into the buffer and flush (no mutex held).
///
/// # Errors
///
/// * Initialisation failure: logged, and the task returns.
/// * Render or flush failure: logged, retried on the next cycle.
pub async fn menu_display_task<I2C>(
    mut driver: OledDriver<I2C>,
    frame: &'static Mutex<CriticalSectionRawMutex, MenuFrame>,
    config: DisplayConfig,
) where
    I2C: I2c,
{
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    let mut ticker = Ticker::every(Duration::from_millis(config.update_period_ms()));
    // Blank panel on boot; the first visible frame differs from it.
    let mut shown = MenuFrame::default();
    let mut force = true;

    loop {
        ticker.next().await;

        let next = frame.lock().await.clone();
        if !force && !FrameChanges::detect(&shown, &next).any_changed() {
            continue;
        }

        if let Err(_e) = driver.draw(&next, &config) {
            #[cfg(feature = "defmt")]
            defmt::error!("render failed: {}", _e);
            continue;
        }

        if let Err(_e) = driver.flush().await {
            #[cfg(feature = "defmt")]
            defmt::error!("flush failed: {}", _e);
            // Leave `shown` stale so the next tick retries.
            continue;
        }

        shown = next;
        force = false;
    }
}
