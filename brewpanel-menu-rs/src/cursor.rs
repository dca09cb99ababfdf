//! Selected-line state for list navigation.

/// Which line is selected, and whether directional commands may move it.
///
/// Navigation is disabled while an edit session is open so that
/// `Previous`/`Next` can be rebound to value adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuCursor {
    line: usize,
    rollover: bool,
    scroll_enabled: bool,
}

impl Default for MenuCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuCursor {
    /// Cursor on line 0, navigation enabled, no rollover.
    pub const fn new() -> Self {
        Self {
            line: 0,
            rollover: false,
            scroll_enabled: true,
        }
    }

    /// Index of the selected line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Back to line 0 with navigation enabled.
    pub fn reset(&mut self) {
        self.line = 0;
        self.scroll_enabled = true;
    }

    /// When set, moving past the last line selects the first and vice versa.
    pub fn set_rollover(&mut self, rollover: bool) {
        self.rollover = rollover;
    }

    pub fn rollover(&self) -> bool {
        self.rollover
    }

    /// Enable or disable list navigation.
    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Select the line above. Returns `true` if the selection changed.
    pub fn move_previous(&mut self, line_count: usize) -> bool {
        if !self.scroll_enabled || line_count == 0 {
            return false;
        }
        let previous = self.line;
        self.line = match self.line.min(line_count - 1) {
            0 if self.rollover => line_count - 1,
            0 => 0,
            n => n - 1,
        };
        self.line != previous
    }

    /// Select the line below. Returns `true` if the selection changed.
    pub fn move_next(&mut self, line_count: usize) -> bool {
        if !self.scroll_enabled || line_count == 0 {
            return false;
        }
        let previous = self.line;
        let last = line_count - 1;
        self.line = match self.line.min(last) {
            n if n == last && self.rollover => 0,
            n if n == last => last,
            n => n + 1,
        };
        self.line != previous
    }
}
