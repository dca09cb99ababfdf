//! One-tick orchestration of input, gate, editing and navigation.

use core::fmt::Write;

use heapless::Vec;

use brewpanel_input::{Command, InputPanel, InputSnapshot, Millis, NUM_BUTTONS};
use brewpanel_params::parameters::{ParamId, ParameterError, ParameterRepository};

use crate::config::MenuConfig;
use crate::cursor::MenuCursor;
use crate::edit::{EditModeCoordinator, EditOutcome};
use crate::frame::{FrameLine, MenuFrame};
use crate::gate::{GateTransition, MenuActivationGate};
use crate::lines::{MenuAction, MenuLine, MenuLines, MAX_MENU_LINES};

/// Something observable that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    Enabled,
    Disabled,
    CursorMoved { line: usize },
    EditStarted { id: ParamId, value: f32 },
    ValueAdjusted { id: ParamId, value: f32 },
    EditCommitted { id: ParamId, value: f32 },
    EditDiscarded { id: ParamId },
    /// All values were written to non-volatile storage.
    Saved,
    ExitRequested,
    RepositoryError(ParameterError),
}

/// Events of one tick, in the order they happened.
pub type MenuEvents = Vec<MenuEvent, 6>;

/// Result of one [`MenuController::tick()`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Debounced statuses and raw commands of this tick.
    pub input: InputSnapshot,
    /// Menu visibility after the tick.
    pub menu_enabled: bool,
    pub events: MenuEvents,
}

/// The single menu instance: every mode flag lives here.
///
/// [`tick()`](Self::tick) is pure with respect to hardware: it takes raw
/// button levels, the current time and the repository, and runs input,
/// gate and coordinator in that fixed order.
///
/// Commands are only acted on when the menu was already open at the start
/// of the tick and no exit is pending. The command that completes the
/// opening gesture is therefore never interpreted as a menu action.
///
/// # Examples
///
/// ```
/// use brewpanel_menu::{MenuConfig, MenuController, MenuLines};
/// use brewpanel_params::parameters::{MemoryStorage, ParameterTable};
///
/// let mut repo = ParameterTable::new(MemoryStorage::new());
/// let mut menu = MenuController::new(MenuLines::standard(), MenuConfig::default());
///
/// // Tap the right button: press, then release.
/// menu.tick([false, true], 0, &mut repo);
/// menu.tick([false, true], 20, &mut repo);
/// menu.tick([false, false], 40, &mut repo);
/// let report = menu.tick([false, false], 60, &mut repo);
/// assert!(report.menu_enabled);
///
/// let frame = menu.frame(&repo);
/// assert_eq!(frame.line_text(0), "Brew Temp: 95.0");
/// ```
#[derive(Debug, Clone)]
pub struct MenuController {
    config: MenuConfig,
    input: InputPanel,
    gate: MenuActivationGate,
    cursor: MenuCursor,
    editor: EditModeCoordinator,
    lines: MenuLines,
    last_known: [Option<f32>; MAX_MENU_LINES],
}

impl MenuController {
    /// Create a closed menu over `lines`.
    pub fn new(lines: MenuLines, config: MenuConfig) -> Self {
        Self {
            config,
            input: InputPanel::new(config.debounce),
            gate: MenuActivationGate::new(),
            cursor: MenuCursor::new(),
            editor: EditModeCoordinator::new(config.boundary),
            lines,
            last_known: [None; MAX_MENU_LINES],
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn lines(&self) -> &MenuLines {
        &self.lines
    }

    pub fn cursor(&self) -> &MenuCursor {
        &self.cursor
    }

    pub fn gate(&self) -> &MenuActivationGate {
        &self.gate
    }

    pub fn editor(&self) -> &EditModeCoordinator {
        &self.editor
    }

    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Ask the menu to close once every button is released, e.g. from a
    /// timeout or a remote command. Returns `false` if it is already closed.
    pub fn request_exit(&mut self) -> bool {
        self.gate.request_exit()
    }

    /// Run one polling cycle.
    pub fn tick<R: ParameterRepository>(
        &mut self,
        raw: [bool; NUM_BUTTONS],
        now: Millis,
        repo: &mut R,
    ) -> TickReport {
        let input = self.input.tick(raw, now);
        self.step(input, repo)
    }

    /// Like [`tick()`](Self::tick), where `None` marks an unreadable input.
    pub fn tick_checked<R: ParameterRepository>(
        &mut self,
        raw: [Option<bool>; NUM_BUTTONS],
        now: Millis,
        repo: &mut R,
    ) -> TickReport {
        let input = self.input.tick_checked(raw, now);
        self.step(input, repo)
    }

    /// Build the renderer snapshot.
    ///
    /// The owning line shows the edit snapshot. Other parameter lines show
    /// the repository value; when the repository cannot be read the last
    /// value seen for that line is shown instead (or `---` if none).
    pub fn frame<R: ParameterRepository>(&mut self, repo: &R) -> MenuFrame {
        let mut frame = MenuFrame {
            visible: self.gate.is_enabled(),
            cursor_line: self.cursor.line(),
            edit_mode_active: self.editor.is_editing(),
            lines: Vec::new(),
        };

        for (index, line) in self.lines.iter().enumerate() {
            let mut out = FrameLine {
                editing: self.editor.owns(index),
                ..FrameLine::default()
            };

            // Formatting errors mean truncation; the line still renders.
            match line {
                MenuLine::Param(binding) => {
                    let value = match self.editor.display_value(index) {
                        Some(v) => Some(v),
                        None => match repo.get(binding.id) {
                            Ok(param) => {
                                self.last_known[index] = Some(param.value);
                                Some(param.value)
                            }
                            Err(_e) => {
                                #[cfg(feature = "defmt")]
                                defmt::warn!("frame: {} unreadable: {}", binding.id.key(), _e);
                                self.last_known[index]
                            }
                        },
                    };
                    let _ = match value {
                        Some(v) => write!(out.text, "{}: {:.1}", binding.label, v),
                        None => write!(out.text, "{}: ---", binding.label),
                    };
                }
                MenuLine::Action { label, .. } => {
                    let _ = out.text.push_str(label);
                }
            }

            // Same capacity as MenuLines.
            let _ = frame.lines.push(out);
        }

        frame
    }

    fn step<R: ParameterRepository>(&mut self, input: InputSnapshot, repo: &mut R) -> TickReport {
        let mut events = MenuEvents::new();
        let live = self.gate.is_enabled() && !self.gate.is_exit_pending();

        match self.gate.update(input.any_active(), input.all_released()) {
            Some(GateTransition::Enabled) => {
                self.cursor.reset();
                self.cursor.set_rollover(true);
                push(&mut events, MenuEvent::Enabled);
            }
            Some(GateTransition::Disabled) => {
                let policy = self.config.exit_policy;
                if let Some(outcome) = self.editor.finish_on_exit(policy, &mut self.cursor, repo) {
                    record(&mut events, outcome);
                }
                push(&mut events, MenuEvent::Disabled);
            }
            None => {}
        }

        if live {
            for &command in input.commands.iter() {
                // An exit chosen earlier in this tick swallows the rest.
                if self.gate.is_exit_pending() {
                    break;
                }
                self.dispatch(command, repo, &mut events);
            }
        }

        TickReport {
            input,
            menu_enabled: self.gate.is_enabled(),
            events,
        }
    }

    fn dispatch<R: ParameterRepository>(
        &mut self,
        command: Command,
        repo: &mut R,
        events: &mut MenuEvents,
    ) {
        match self.editor.handle(command, &mut self.cursor, &self.lines, repo) {
            EditOutcome::Pass => self.navigate(command, repo, events),
            outcome => record(events, outcome),
        }
    }

    fn navigate<R: ParameterRepository>(
        &mut self,
        command: Command,
        repo: &mut R,
        events: &mut MenuEvents,
    ) {
        let count = self.lines.len();
        match command {
            Command::Previous => {
                if self.cursor.move_previous(count) {
                    push(events, MenuEvent::CursorMoved { line: self.cursor.line() });
                }
            }
            Command::Next => {
                if self.cursor.move_next(count) {
                    push(events, MenuEvent::CursorMoved { line: self.cursor.line() });
                }
            }
            Command::Enter => match self.lines.get(self.cursor.line()) {
                Some(MenuLine::Action { action: MenuAction::Save, .. }) => {
                    match repo.commit_to_storage() {
                        Ok(()) => push(events, MenuEvent::Saved),
                        Err(e) => {
                            #[cfg(feature = "defmt")]
                            defmt::warn!("save failed: {}", e);
                            push(events, MenuEvent::RepositoryError(e));
                        }
                    }
                }
                Some(MenuLine::Action { action: MenuAction::Exit, .. }) => {
                    if self.gate.request_exit() {
                        push(events, MenuEvent::ExitRequested);
                    }
                }
                // Parameter lines are opened by the coordinator.
                Some(MenuLine::Param(_)) | None => {}
            },
        }
    }
}

fn record(events: &mut MenuEvents, outcome: EditOutcome) {
    let event = match outcome {
        EditOutcome::Pass | EditOutcome::Ignored => return,
        EditOutcome::Started { id, value } => MenuEvent::EditStarted { id, value },
        EditOutcome::Adjusted { id, value } => MenuEvent::ValueAdjusted { id, value },
        EditOutcome::Committed { id, value } => MenuEvent::EditCommitted { id, value },
        EditOutcome::Discarded { id } => MenuEvent::EditDiscarded { id },
        EditOutcome::Failed { error, .. } => MenuEvent::RepositoryError(error),
    };
    push(events, event);
}

fn push(events: &mut MenuEvents, event: MenuEvent) {
    #[cfg(feature = "defmt")]
    defmt::debug!("menu event: {}", event);
    if events.push(event).is_err() {
        #[cfg(feature = "defmt")]
        defmt::warn!("menu event dropped");
    }
}
