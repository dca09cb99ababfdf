//! Menu rendering for the brewpanel SSD1306 (128×64) display.
//!
//! [`render_menu`] draws a [`MenuFrame`] onto any `embedded-graphics`
//! [`DrawTarget`], so layout can be tested on the host. [`OledDriver`]
//! wraps the [`ssd1306`] crate in async buffered-graphics mode, and
//! [`menu_display_task`] (feature `task`) redraws the panel whenever the
//! shared frame changes.
//!
//! # Quick Start
//!
//! ```ignore
//! use brewpanel_display::{menu_display_task, DisplayConfig, OledDriver};
//!
//! // Embassy tasks cannot be generic, so wrap with the concrete I2C type:
//! #[embassy_executor::task]
//! async fn oled_task(
//!     driver: OledDriver<MyI2cType>,
//!     frame: &'static Mutex<CriticalSectionRawMutex, MenuFrame>,
//!     config: DisplayConfig,
//! ) {
//!     menu_display_task(driver, frame, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`].
//! - **`task`** — the Embassy update loop [`menu_display_task`].
//!
//! [`MenuFrame`]: brewpanel_menu::MenuFrame
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

#![no_std]

#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod layout;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use display_task::menu_display_task;
pub use driver::OledDriver;
pub use error::OledError;
pub use layout::{first_visible_line, render_menu, DisplayConfig};
