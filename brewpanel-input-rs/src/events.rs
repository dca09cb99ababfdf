//! Status diffing and command generation.

use heapless::Vec;

use crate::debouncer::{ButtonStatus, DebounceConfig, InputDebouncer, Millis};
use crate::{ButtonId, NUM_BUTTONS};

/// Menu command derived from button activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Tap on the left button: move up / decrement.
    Previous,
    /// Tap on the right button: move down / increment.
    Next,
    /// Any button reached hold: select / toggle edit mode.
    Enter,
}

/// Commands produced by one tick. At most one per button, in
/// [`ButtonId::ALL`] order.
pub type CommandBatch = Vec<Command, NUM_BUTTONS>;

/// Turns per-tick button statuses into commands.
///
/// A press is only actionable once it resolves: releasing before the hold
/// delay yields the button's tap command, reaching hold yields
/// [`Command::Enter`]. The release that ends a hold produces nothing.
#[derive(Debug, Clone)]
pub struct ButtonEventAggregator {
    last: [ButtonStatus; NUM_BUTTONS],
}

impl Default for ButtonEventAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonEventAggregator {
    /// Create an aggregator that assumes every button starts released.
    pub const fn new() -> Self {
        Self {
            last: [ButtonStatus::Released; NUM_BUTTONS],
        }
    }

    /// Status of `button` as of the previous call to [`process()`](Self::process).
    pub fn last_status(&self, button: ButtonId) -> ButtonStatus {
        self.last[button.index()]
    }

    /// Diff `current` against the previous tick and emit commands.
    ///
    /// An [`Unknown`](ButtonStatus::Unknown) status is skipped: the button
    /// keeps its last readable status and emits nothing this tick.
    pub fn process(&mut self, current: [ButtonStatus; NUM_BUTTONS]) -> CommandBatch {
        let mut commands = CommandBatch::new();

        for button in ButtonId::ALL {
            let idx = button.index();
            let previous = self.last[idx];
            let status = current[idx];
            if status == ButtonStatus::Unknown {
                // Keep the last good status so the read gap is invisible.
                #[cfg(feature = "defmt")]
                defmt::error!("button {} in unknown status", button);
                continue;
            }
            if status == previous {
                continue;
            }

            if let Some(command) = Self::classify(button, previous, status) {
                #[cfg(feature = "defmt")]
                defmt::debug!("button {}: {} -> {}", button, previous, command);
                // Capacity is one slot per button.
                let _ = commands.push(command);
            }
            self.last[idx] = status;
        }

        commands
    }

    fn classify(button: ButtonId, previous: ButtonStatus, status: ButtonStatus) -> Option<Command> {
        match status {
            // Wait for release or hold to tell a tap from a hold.
            ButtonStatus::Pressed => None,
            ButtonStatus::Hold => Some(Command::Enter),
            ButtonStatus::Released if previous == ButtonStatus::Pressed => {
                Some(button.tap_command())
            }
            ButtonStatus::Released | ButtonStatus::Unknown => None,
        }
    }
}

/// Result of one [`InputPanel::tick()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Debounced status of every button, indexed by [`ButtonId::index()`].
    pub statuses: [ButtonStatus; NUM_BUTTONS],
    /// Commands emitted this tick.
    pub commands: CommandBatch,
}

impl InputSnapshot {
    /// `true` when every button is confirmed released.
    ///
    /// An [`Unknown`](ButtonStatus::Unknown) button is not confirmed
    /// released.
    pub fn all_released(&self) -> bool {
        self.statuses.iter().all(|&s| s == ButtonStatus::Released)
    }

    /// `true` when at least one button is pressed or held.
    pub fn any_active(&self) -> bool {
        self.statuses.iter().any(|s| s.is_active())
    }

    /// Status of a single button.
    pub fn status(&self, button: ButtonId) -> ButtonStatus {
        self.statuses[button.index()]
    }
}

/// All panel buttons: one debouncer each plus the command aggregator.
///
/// [`tick()`](Self::tick) is pure with respect to hardware: callers pass
/// the raw levels and the current time, which keeps the whole input path
/// testable on the host.
///
/// # Examples
///
/// ```
/// use brewpanel_input::{Command, DebounceConfig, InputPanel};
///
/// let mut panel = InputPanel::new(DebounceConfig::default());
/// panel.tick([true, false], 0);
/// panel.tick([true, false], 20); // left pressed
/// let snapshot = panel.tick([false, false], 30);
/// assert!(snapshot.commands.is_empty()); // release still debouncing
/// let snapshot = panel.tick([false, false], 50);
/// assert_eq!(snapshot.commands.as_slice(), &[Command::Previous]);
/// ```
#[derive(Debug, Clone)]
pub struct InputPanel {
    debouncers: [InputDebouncer; NUM_BUTTONS],
    aggregator: ButtonEventAggregator,
}

impl InputPanel {
    /// Create a panel with every button released.
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            debouncers: [InputDebouncer::new(config); NUM_BUTTONS],
            aggregator: ButtonEventAggregator::new(),
        }
    }

    /// Sample every button once and emit this tick's commands.
    pub fn tick(&mut self, raw: [bool; NUM_BUTTONS], now: Millis) -> InputSnapshot {
        self.tick_checked(raw.map(Some), now)
    }

    /// Like [`tick()`](Self::tick), where `None` marks an unreadable input.
    ///
    /// An unreadable input reports [`ButtonStatus::Unknown`] for this tick
    /// and its debouncer is left untouched.
    pub fn tick_checked(&mut self, raw: [Option<bool>; NUM_BUTTONS], now: Millis) -> InputSnapshot {
        let mut statuses = [ButtonStatus::Unknown; NUM_BUTTONS];
        for button in ButtonId::ALL {
            let idx = button.index();
            statuses[idx] = self.debouncers[idx].sample_checked(raw[idx], now);
        }

        let commands = self.aggregator.process(statuses);
        InputSnapshot { statuses, commands }
    }

    /// Debouncer of a single button.
    pub fn debouncer(&self, button: ButtonId) -> &InputDebouncer {
        &self.debouncers[button.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ButtonStatus::{Hold, Pressed, Released, Unknown};

    // ── Aggregator ───────────────────────────────────────────────────

    #[test]
    fn press_alone_emits_nothing() {
        let mut agg = ButtonEventAggregator::new();
        assert!(agg.process([Pressed, Released]).is_empty());
        assert_eq!(agg.last_status(ButtonId::Left), Pressed);
    }

    #[test]
    fn tap_emits_direction_of_button() {
        let mut agg = ButtonEventAggregator::new();
        agg.process([Pressed, Released]);
        assert_eq!(agg.process([Released, Released]).as_slice(), &[Command::Previous]);

        agg.process([Released, Pressed]);
        assert_eq!(agg.process([Released, Released]).as_slice(), &[Command::Next]);
    }

    #[test]
    fn hold_emits_enter_once_and_release_is_silent() {
        let mut agg = ButtonEventAggregator::new();
        agg.process([Released, Pressed]);
        assert_eq!(agg.process([Released, Hold]).as_slice(), &[Command::Enter]);
        // Unchanged status: no repeat.
        assert!(agg.process([Released, Hold]).is_empty());
        // Release after hold is not a tap.
        assert!(agg.process([Released, Released]).is_empty());
    }

    #[test]
    fn commands_follow_button_order() {
        let mut agg = ButtonEventAggregator::new();
        agg.process([Pressed, Pressed]);
        assert_eq!(
            agg.process([Released, Released]).as_slice(),
            &[Command::Previous, Command::Next]
        );

        agg.process([Pressed, Pressed]);
        assert_eq!(
            agg.process([Released, Hold]).as_slice(),
            &[Command::Previous, Command::Enter]
        );
    }

    #[test]
    fn unknown_status_keeps_last_status_and_tap() {
        let mut agg = ButtonEventAggregator::new();
        agg.process([Pressed, Released]);
        assert!(agg.process([Unknown, Released]).is_empty());
        assert_eq!(agg.last_status(ButtonId::Left), Pressed);
        // The press-release cycle spans the unreadable tick.
        assert_eq!(agg.process([Released, Released]).as_slice(), &[Command::Previous]);
    }

    #[test]
    fn unknown_during_hold_does_not_repeat_enter() {
        let mut agg = ButtonEventAggregator::new();
        agg.process([Pressed, Released]);
        assert_eq!(agg.process([Hold, Released]).as_slice(), &[Command::Enter]);
        assert!(agg.process([Unknown, Released]).is_empty());
        assert!(agg.process([Hold, Released]).is_empty());
        assert!(agg.process([Released, Released]).is_empty());
    }

    // ── Panel ────────────────────────────────────────────────────────

    #[test]
    fn panel_tap_timeline() {
        let mut panel = InputPanel::new(DebounceConfig::default());
        assert!(panel.tick([false, true], 0).commands.is_empty());
        let snap = panel.tick([false, true], 20);
        assert_eq!(snap.status(ButtonId::Right), Pressed);
        assert!(snap.commands.is_empty());
        assert!(snap.any_active());

        assert!(panel.tick([false, false], 100).commands.is_empty());
        let snap = panel.tick([false, false], 120);
        assert_eq!(snap.commands.as_slice(), &[Command::Next]);
        assert!(snap.all_released());
    }

    #[test]
    fn panel_hold_timeline() {
        let mut panel = InputPanel::new(DebounceConfig::default());
        let mut enters = 0;
        let mut t = 0;
        while t <= 1000 {
            let snap = panel.tick([true, false], t);
            enters += snap.commands.iter().filter(|&&c| c == Command::Enter).count();
            t += 10;
        }
        assert_eq!(enters, 1);
        assert_eq!(panel.debouncer(ButtonId::Left).status(), Hold);
    }

    #[test]
    fn unreadable_tick_mid_hold_emits_one_enter() {
        let mut panel = InputPanel::new(DebounceConfig::default());
        let mut enters = 0;
        let mut t = 0;
        while t <= 1200 {
            let raw = if t == 800 { [None, Some(false)] } else { [Some(true), Some(false)] };
            let snap = panel.tick_checked(raw, t);
            enters += snap.commands.iter().filter(|&&c| c == Command::Enter).count();
            t += 10;
        }
        assert_eq!(enters, 1);

        // The release after the hold is still silent.
        let mut released = 0;
        while t <= 1300 {
            released += panel.tick([false, false], t).commands.len();
            t += 10;
        }
        assert_eq!(released, 0);
    }

    #[test]
    fn unreadable_input_is_unknown_and_not_released() {
        let mut panel = InputPanel::new(DebounceConfig::default());
        let snap = panel.tick_checked([None, Some(false)], 0);
        assert_eq!(snap.status(ButtonId::Left), Unknown);
        assert!(!snap.all_released());
        assert!(!snap.any_active());
        // The debouncer itself was not touched.
        assert_eq!(panel.debouncer(ButtonId::Left).status(), Released);
    }
}
