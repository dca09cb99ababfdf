//! In-place value editing.

use brewpanel_input::Command;
use brewpanel_params::parameters::{ParamId, Parameter, ParameterError, ParameterRepository};

use crate::config::{Boundary, ExitPolicy};
use crate::cursor::MenuCursor;
use crate::lines::{MenuLine, MenuLines};

/// The one in-flight edit.
///
/// Holds a copy of the parameter's range taken when the session opened and
/// the live snapshot value. The repository is only written on commit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditSession {
    /// Menu line that owns the session.
    pub line: usize,
    pub id: ParamId,
    /// Amount per directional command.
    pub step: f32,
    /// Range and default as read from the repository.
    pub bounds: Parameter,
    /// Value being edited, always within `bounds`.
    pub snapshot: f32,
}

/// Result of offering a command to the [`EditModeCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditOutcome {
    /// Not an edit command. The caller handles it as navigation or action.
    Pass,
    /// Consumed with no effect.
    Ignored,
    Started { id: ParamId, value: f32 },
    Adjusted { id: ParamId, value: f32 },
    Committed { id: ParamId, value: f32 },
    /// Session closed without writing.
    Discarded { id: ParamId },
    /// A repository call failed. The frame keeps the last-known value.
    Failed { id: ParamId, error: ParameterError },
}

/// Switches the two directional commands between list navigation and value
/// adjustment.
///
/// There is exactly one session slot, so at most one line is ever in edit
/// mode. While it is occupied, list navigation on the [`MenuCursor`] is
/// disabled and the cursor cannot leave the owning line.
#[derive(Debug, Clone, Default)]
pub struct EditModeCoordinator {
    session: Option<EditSession>,
    boundary: Boundary,
}

impl EditModeCoordinator {
    pub const fn new(boundary: Boundary) -> Self {
        Self {
            session: None,
            boundary,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// `true` if `line` owns the open session.
    pub fn owns(&self, line: usize) -> bool {
        self.session.is_some_and(|s| s.line == line)
    }

    /// Value to show for `line`: the live snapshot if `line` owns the
    /// session, otherwise `None` (show the repository value).
    pub fn display_value(&self, line: usize) -> Option<f32> {
        self.session.filter(|s| s.line == line).map(|s| s.snapshot)
    }

    /// Offer one command.
    ///
    /// * `Enter` on a parameter line while navigating opens a session.
    /// * `Enter` on the owning line while editing writes the snapshot. A
    ///   failed write keeps the session open.
    /// * `Previous`/`Next` while editing step the snapshot.
    pub fn handle<R: ParameterRepository>(
        &mut self,
        command: Command,
        cursor: &mut MenuCursor,
        lines: &MenuLines,
        repo: &mut R,
    ) -> EditOutcome {
        let Some(session) = self.session.as_mut() else {
            return match command {
                Command::Enter => self.start(cursor, lines, repo),
                Command::Previous | Command::Next => EditOutcome::Pass,
            };
        };

        match command {
            Command::Previous => {
                session.snapshot = step(self.boundary, &session.bounds, session.snapshot, -session.step);
                EditOutcome::Adjusted { id: session.id, value: session.snapshot }
            }
            Command::Next => {
                session.snapshot = step(self.boundary, &session.bounds, session.snapshot, session.step);
                EditOutcome::Adjusted { id: session.id, value: session.snapshot }
            }
            Command::Enter if session.line != cursor.line() => EditOutcome::Ignored,
            Command::Enter => {
                let (id, value) = (session.id, session.snapshot);
                match repo.set(id, value) {
                    Ok(()) => {
                        self.session = None;
                        cursor.set_scroll_enabled(true);
                        #[cfg(feature = "defmt")]
                        defmt::info!("{} committed: {}", id.key(), value);
                        EditOutcome::Committed { id, value }
                    }
                    Err(error) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("commit of {} failed: {}", id.key(), error);
                        EditOutcome::Failed { id, error }
                    }
                }
            }
        }
    }

    /// Close any open session because the menu is closing.
    ///
    /// Returns `None` when no session was open. The session is gone
    /// afterwards even if a [`ExitPolicy::Commit`] write fails.
    pub fn finish_on_exit<R: ParameterRepository>(
        &mut self,
        policy: ExitPolicy,
        cursor: &mut MenuCursor,
        repo: &mut R,
    ) -> Option<EditOutcome> {
        let session = self.session.take()?;
        cursor.set_scroll_enabled(true);

        let outcome = match policy {
            ExitPolicy::Discard => EditOutcome::Discarded { id: session.id },
            ExitPolicy::Commit => match repo.set(session.id, session.snapshot) {
                Ok(()) => EditOutcome::Committed { id: session.id, value: session.snapshot },
                Err(error) => EditOutcome::Failed { id: session.id, error },
            },
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("edit closed on exit: {}", outcome);
        Some(outcome)
    }

    fn start<R: ParameterRepository>(
        &mut self,
        cursor: &mut MenuCursor,
        lines: &MenuLines,
        repo: &R,
    ) -> EditOutcome {
        let line = cursor.line();
        let Some(MenuLine::Param(binding)) = lines.get(line) else {
            return EditOutcome::Pass;
        };

        match repo.get(binding.id) {
            Ok(param) => {
                self.session = Some(EditSession {
                    line,
                    id: binding.id,
                    step: binding.step,
                    bounds: param,
                    snapshot: param.value,
                });
                cursor.set_scroll_enabled(false);
                EditOutcome::Started { id: binding.id, value: param.value }
            }
            Err(error) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("cannot edit {}: {}", binding.id.key(), error);
                EditOutcome::Failed { id: binding.id, error }
            }
        }
    }
}

fn step(boundary: Boundary, bounds: &Parameter, value: f32, delta: f32) -> f32 {
    match boundary {
        Boundary::Wrap => bounds.step_wrapping(value, delta),
        Boundary::Clamp => bounds.step_clamped(value, delta),
    }
}
