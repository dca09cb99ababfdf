//! Renderer-facing menu snapshot.

use heapless::{String, Vec};

use crate::lines::MAX_MENU_LINES;

/// Capacity of one rendered line in bytes.
pub const LINE_TEXT_CAPACITY: usize = 24;

/// Text of one rendered line.
pub type LineText = String<LINE_TEXT_CAPACITY>;

/// One line as the renderer should draw it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLine {
    /// `"<label>: <value>"` for parameters, the bare label for actions.
    pub text: LineText,
    /// `true` on the line that owns the edit session.
    pub editing: bool,
}

/// Everything a renderer needs to draw the menu, produced by
/// [`MenuController::frame()`](crate::MenuController::frame).
///
/// The snapshot owns its text, so it can be handed to a display task and
/// rendered after the repository lock is released.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFrame {
    /// `false` while the menu is closed. Renderers draw nothing.
    pub visible: bool,
    pub cursor_line: usize,
    /// `true` while any line is being edited.
    pub edit_mode_active: bool,
    pub lines: Vec<FrameLine, MAX_MENU_LINES>,
}

impl MenuFrame {
    /// Index of the line being edited, if any.
    pub fn editing_line(&self) -> Option<usize> {
        self.lines.iter().position(|l| l.editing)
    }

    /// Text of line `index`, or `""` past the end.
    pub fn line_text(&self, index: usize) -> &str {
        self.lines.get(index).map_or("", |l| l.text.as_str())
    }
}

// ── FrameChanges ─────────────────────────────────────────────────────────

/// Identifies which parts of the menu changed between two [`MenuFrame`]s.
///
/// Used to skip redraws and flushes when nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameChanges {
    pub visibility_changed: bool,
    pub cursor_changed: bool,
    pub mode_changed: bool,
    /// Per-line flag: text or editing marker differs, or the line was added
    /// or removed.
    pub line_changed: [bool; MAX_MENU_LINES],
}

impl FrameChanges {
    /// Diff two frames field by field.
    pub fn detect(old: &MenuFrame, new: &MenuFrame) -> Self {
        let mut line_changed = [false; MAX_MENU_LINES];
        for (i, changed) in line_changed.iter_mut().enumerate() {
            *changed = old.lines.get(i) != new.lines.get(i);
        }

        Self {
            visibility_changed: old.visible != new.visible,
            cursor_changed: old.cursor_line != new.cursor_line,
            mode_changed: old.edit_mode_active != new.edit_mode_active,
            line_changed,
        }
    }

    /// Returns `true` if anything changed.
    pub fn any_changed(&self) -> bool {
        self.visibility_changed
            || self.cursor_changed
            || self.mode_changed
            || self.line_changed.iter().any(|&c| c)
    }

    /// Number of lines whose content changed.
    pub fn changed_line_count(&self) -> usize {
        self.line_changed.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(texts: &[&str], editing: Option<usize>) -> MenuFrame {
        let mut frame = MenuFrame {
            visible: true,
            cursor_line: 0,
            edit_mode_active: editing.is_some(),
            lines: Vec::new(),
        };
        for (i, text) in texts.iter().enumerate() {
            let mut line = FrameLine::default();
            line.text.push_str(text).unwrap();
            line.editing = editing == Some(i);
            frame.lines.push(line).unwrap();
        }
        frame
    }

    #[test]
    fn default_frame_is_hidden_and_empty() {
        let f = MenuFrame::default();
        assert!(!f.visible);
        assert!(f.lines.is_empty());
        assert_eq!(f.editing_line(), None);
        assert_eq!(f.line_text(0), "");
    }

    #[test]
    fn editing_line_and_text_lookup() {
        let f = frame(&["A: 1.0", "B: 2.0"], Some(1));
        assert_eq!(f.editing_line(), Some(1));
        assert_eq!(f.line_text(1), "B: 2.0");
    }

    #[test]
    fn identical_frames_have_no_changes() {
        let f = frame(&["A: 1.0", "Exit"], None);
        assert!(!FrameChanges::detect(&f, &f).any_changed());
    }

    #[test]
    fn value_change_marks_only_that_line() {
        let a = frame(&["A: 1.0", "B: 2.0"], Some(1));
        let b = frame(&["A: 1.0", "B: 2.5"], Some(1));
        let changes = FrameChanges::detect(&a, &b);
        assert!(!changes.line_changed[0]);
        assert!(changes.line_changed[1]);
        assert_eq!(changes.changed_line_count(), 1);
        assert!(!changes.mode_changed);
        assert!(changes.any_changed());
    }

    #[test]
    fn mode_and_cursor_changes_detected() {
        let a = frame(&["A: 1.0"], None);
        let mut b = frame(&["A: 1.0"], Some(0));
        b.cursor_line = 0;
        let changes = FrameChanges::detect(&a, &b);
        assert!(changes.mode_changed);
        assert!(changes.line_changed[0]);

        let mut c = a.clone();
        c.cursor_line = 1;
        assert!(FrameChanges::detect(&a, &c).cursor_changed);
    }

    #[test]
    fn hiding_is_a_change() {
        let a = frame(&["A: 1.0"], None);
        let b = MenuFrame::default();
        let changes = FrameChanges::detect(&a, &b);
        assert!(changes.visibility_changed);
        assert!(changes.line_changed[0]);
    }
}
