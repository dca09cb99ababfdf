//! Display geometry and menu rendering.
//!
//! [`render_menu`] draws a [`MenuFrame`] as a scrolling list: one text row
//! per menu line, a `>` marker on the selected line, and the line being
//! edited drawn inverted.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use brewpanel_menu::MenuFrame;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Configuration for the display layout and update task.
///
/// All layout geometry lives here; there are no module-level layout
/// constants. [`DisplayConfig::default()`] fits a 128×64 panel with four
/// 15 px rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Display refresh rate in Hz. Default: 30. Max: 60.
    pub update_frequency_hz: u32,

    // ── Layout geometry ──────────────────────────────────────────────
    /// Total display width in pixels. Default: 128.
    pub display_width: u32,
    /// Total display height in pixels. Default: 64.
    pub display_height: u32,
    /// Height of one menu row in pixels. Default: 15.
    pub line_height: u32,
    /// X offset of the line text; the cursor marker sits left of it.
    /// Default: 9.
    pub text_indent: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            display_width: 128,
            display_height: 64,
            line_height: 15,
            text_indent: 9,
        }
    }
}

impl DisplayConfig {
    /// Convert the configured frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / update_frequency_hz`.
    pub fn update_period_ms(&self) -> u64 {
        1000 / self.update_frequency_hz as u64
    }

    /// Number of menu rows that fit on the display (at least one).
    pub fn visible_rows(&self) -> usize {
        (self.display_height / self.line_height.max(1)).max(1) as usize
    }
}

// ── Scrolling ────────────────────────────────────────────────────────────

/// Index of the first line to draw so that `cursor` is on screen.
///
/// The list scrolls only once the cursor passes the last visible row, and
/// then keeps the cursor on that row.
pub fn first_visible_line(cursor: usize, line_count: usize, rows: usize) -> usize {
    if line_count <= rows || cursor < rows {
        return 0;
    }
    (cursor.min(line_count - 1) + 1).saturating_sub(rows)
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Render a [`MenuFrame`] to a display buffer using `embedded-graphics`.
///
/// Draws nothing for a hidden frame; callers clear the buffer first.
///
/// # Layout
///
/// ```text
/// ┌──────────────────────────────────────┐
/// │ > Brew Temp: 95.0                     │  ← selected line
/// │ ████ Brew Time: 26.0 ████████████████ │  ← line being edited (inverted)
/// │   Steam Temp: 120.0                   │
/// │   PID Kp: 62.0                        │
/// └──────────────────────────────────────┘
///  ↑ text_indent
/// ```
///
/// # Example
///
/// ```no_run
/// # use brewpanel_display::{render_menu, DisplayConfig};
/// # use brewpanel_menu::MenuFrame;
/// # fn example(display: &mut impl embedded_graphics::draw_target::DrawTarget<Color = embedded_graphics::pixelcolor::BinaryColor>, frame: &MenuFrame) {
/// render_menu(display, frame, &DisplayConfig::default()).ok();
/// # }
/// ```
pub fn render_menu<D>(display: &mut D, frame: &MenuFrame, config: &DisplayConfig) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if !frame.visible {
        return Ok(());
    }

    let normal = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let inverted = MonoTextStyle::new(&FONT_6X10, BinaryColor::Off);
    let highlight = PrimitiveStyle::with_fill(BinaryColor::On);

    let rows = config.visible_rows();
    let first = first_visible_line(frame.cursor_line, frame.lines.len(), rows);
    let row_height = config.line_height as i32;
    // Centre the 10 px font vertically in the row.
    let text_offset = (row_height - 10).max(0) / 2;

    for (row, (index, line)) in frame.lines.iter().enumerate().skip(first).take(rows).enumerate() {
        let top = row as i32 * row_height;

        let style = if line.editing {
            Rectangle::new(Point::new(0, top), Size::new(config.display_width, config.line_height))
                .into_styled(highlight)
                .draw(display)?;
            inverted
        } else {
            normal
        };

        if index == frame.cursor_line {
            Text::with_baseline(">", Point::new(1, top + text_offset), style, Baseline::Top)
                .draw(display)?;
        }

        Text::with_baseline(
            line.text.as_str(),
            Point::new(config.text_indent, top + text_offset),
            style,
            Baseline::Top,
        )
        .draw(display)?;
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────
