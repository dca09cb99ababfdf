//! Debounced button input for the brewpanel two-button menu.
//!
//! This crate turns raw, noisy button levels into classified statuses and
//! menu commands. It performs no I/O of its own beyond the optional
//! [`ButtonPin`] wrapper, so everything can be driven from host tests.
//!
//! # Architecture
//!
//! The crate is split into three layers, leaf first:
//!
//! - **[`InputDebouncer`]** — per-button state machine that filters one raw
//!   level into [`ButtonStatus::Released`], [`Pressed`](ButtonStatus::Pressed)
//!   or [`Hold`](ButtonStatus::Hold).
//! - **[`ButtonEventAggregator`]** — diffs this tick's statuses against the
//!   previous tick and emits [`Command`]s.
//! - **[`InputPanel`]** — owns one debouncer per [`ButtonId`] plus the
//!   aggregator and exposes the pure `tick(raw, now)` entry point.
//!
//! ```text
//!  raw levels ──► InputDebouncer[Left]  ──┐
//!                 InputDebouncer[Right] ──┴──► ButtonEventAggregator ──► Commands
//! ```
//!
//! # Timing
//!
//! Time is a free-running millisecond counter ([`Millis`]) that is allowed
//! to wrap. All elapsed-time checks use wrapping subtraction.
//!
//! # Features
//!
//! - **`defmt`** — structured logging of state resets and emitted commands,
//!   and [`defmt::Format`] implementations on the public types.

#![no_std]

mod button;
mod debouncer;
mod error;
mod events;

pub use button::{ActiveLevel, ButtonPin};
pub use debouncer::{
    ButtonState, ButtonStatus, DebounceConfig, InputDebouncer, Millis, DEBOUNCE_DELAY_MS,
    HOLD_DELAY_MS,
};
pub use error::InputError;
pub use events::{ButtonEventAggregator, Command, CommandBatch, InputPanel, InputSnapshot};

/// Number of physical buttons on the panel.
pub const NUM_BUTTONS: usize = 2;

/// Identity of a physical button.
///
/// The discriminant doubles as the index into per-button arrays, and
/// [`ButtonId::ALL`] is the fixed evaluation order used on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Left = 0,
    Right = 1,
}

impl ButtonId {
    /// All buttons in evaluation order.
    pub const ALL: [ButtonId; NUM_BUTTONS] = [ButtonId::Left, ButtonId::Right];

    /// Index of this button in per-button arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Command emitted when this button is tapped (pressed, then released
    /// before reaching hold).
    pub const fn tap_command(self) -> Command {
        match self {
            ButtonId::Left => Command::Previous,
            ButtonId::Right => Command::Next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_indices_follow_evaluation_order() {
        for (i, button) in ButtonId::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn tap_commands_are_bound_per_button() {
        assert_eq!(ButtonId::Left.tap_command(), Command::Previous);
        assert_eq!(ButtonId::Right.tap_command(), Command::Next);
    }
}
