//! Per-button debounce and hold detection.

/// Free-running millisecond counter. Wraps after `u32::MAX`.
pub type Millis = u32;

/// Time a raw level must stay stable before a press or release is accepted.
pub const DEBOUNCE_DELAY_MS: Millis = 20;

/// Time a press must be continuously active before it is reported as hold.
pub const HOLD_DELAY_MS: Millis = 600;

/// Timing configuration for an [`InputDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Quiet period required before a level change is accepted. Default: 20.
    pub debounce_ms: Millis,
    /// Continuous active time, measured from the start of the press, after
    /// which the status becomes [`ButtonStatus::Hold`]. Default: 600.
    pub hold_ms: Millis,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_DELAY_MS,
            hold_ms: HOLD_DELAY_MS,
        }
    }
}

/// Logical status reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonStatus {
    /// The input could not be classified (unreadable or uninitialised).
    #[default]
    Unknown,
    Released,
    Pressed,
    /// Refinement of pressed: active for at least the hold delay.
    Hold,
}

impl ButtonStatus {
    /// `true` for [`Pressed`](Self::Pressed) and [`Hold`](Self::Hold).
    pub const fn is_active(self) -> bool {
        matches!(self, ButtonStatus::Pressed | ButtonStatus::Hold)
    }
}

/// Underlying debounced electrical state. Hold is a status, not a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Not yet initialised. The next sample resets to `Released`.
    #[default]
    Unknown,
    Released,
    Pressed,
}

/// Debounce and hold state machine for one input.
///
/// Feed it one raw sample per tick with [`sample()`](Self::sample). The
/// returned status only changes after the raw level has been stable for
/// [`DebounceConfig::debounce_ms`]; any contrary sample during that window
/// restarts it.
///
/// A `Default` debouncer starts in [`ButtonState::Unknown`] and heals itself
/// to released on the first sample. Use [`new()`](Self::new) to start
/// released directly.
///
/// # Examples
///
/// ```
/// use brewpanel_input::{ButtonStatus, DebounceConfig, InputDebouncer};
///
/// let mut button = InputDebouncer::new(DebounceConfig::default());
/// assert_eq!(button.sample(true, 0), ButtonStatus::Released);
/// assert_eq!(button.sample(true, 20), ButtonStatus::Pressed);
/// assert_eq!(button.sample(true, 600), ButtonStatus::Hold);
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputDebouncer {
    config: DebounceConfig,
    state: ButtonState,
    status: ButtonStatus,
    debounce_start: Option<Millis>,
    active_start: Option<Millis>,
}

impl InputDebouncer {
    /// Create a debouncer in the released state.
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            state: ButtonState::Released,
            status: ButtonStatus::Released,
            debounce_start: None,
            active_start: None,
        }
    }

    /// Current debounced state.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Status returned by the most recent sample.
    pub fn status(&self) -> ButtonStatus {
        self.status
    }

    /// Timing configuration in use.
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Advance the state machine with one raw sample taken at `now`.
    ///
    /// `raw_active` must already be aligned to the input's active level
    /// (`true` means "button is being pushed").
    pub fn sample(&mut self, raw_active: bool, now: Millis) -> ButtonStatus {
        match self.state {
            ButtonState::Released => self.sample_released(raw_active, now),
            ButtonState::Pressed => self.sample_pressed(raw_active, now),
            ButtonState::Unknown => {
                #[cfg(feature = "defmt")]
                defmt::warn!("debouncer in unknown state, resetting to released");
                self.reset();
            }
        }
        self.status
    }

    /// Like [`sample()`](Self::sample), but accepts an unreadable input.
    ///
    /// `None` returns [`ButtonStatus::Unknown`] and leaves every field of the
    /// state machine untouched, so a transient read failure cannot fake a
    /// press or a release.
    pub fn sample_checked(&mut self, raw_active: Option<bool>, now: Millis) -> ButtonStatus {
        match raw_active {
            Some(active) => self.sample(active, now),
            None => ButtonStatus::Unknown,
        }
    }

    /// Force the released baseline, dropping any running timers.
    pub fn reset(&mut self) {
        self.state = ButtonState::Released;
        self.status = ButtonStatus::Released;
        self.debounce_start = None;
        self.active_start = None;
    }

    fn sample_released(&mut self, raw_active: bool, now: Millis) {
        if !raw_active {
            // Any release during the debounce window re-arms it from scratch.
            self.debounce_start = None;
            self.active_start = None;
            return;
        }

        match self.debounce_start {
            None => {
                self.debounce_start = Some(now);
                self.active_start = Some(now);
            }
            Some(start) if elapsed(now, start) >= self.config.debounce_ms => {
                self.debounce_start = None;
                self.state = ButtonState::Pressed;
                self.status = ButtonStatus::Pressed;
            }
            Some(_) => {}
        }
    }

    fn sample_pressed(&mut self, raw_active: bool, now: Millis) {
        if raw_active {
            self.debounce_start = None;
            let since = *self.active_start.get_or_insert(now);
            if elapsed(now, since) >= self.config.hold_ms {
                self.status = ButtonStatus::Hold;
            }
            return;
        }

        match self.debounce_start {
            None => self.debounce_start = Some(now),
            Some(start) if elapsed(now, start) >= self.config.debounce_ms => {
                self.debounce_start = None;
                self.active_start = None;
                self.state = ButtonState::Released;
                self.status = ButtonStatus::Released;
            }
            Some(_) => {}
        }
    }
}

/// Milliseconds from `since` to `now`, correct across counter rollover.
fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}
