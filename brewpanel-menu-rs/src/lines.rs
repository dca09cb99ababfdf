//! Registered menu content.

use heapless::Vec;

use brewpanel_params::parameters::ParamId;

use crate::error::MenuError;

/// Maximum number of lines in one menu.
pub const MAX_MENU_LINES: usize = 8;

/// Maximum label length in bytes. Keeps `"<label>: <value>"` on one row of
/// a 128 px display with the 6 px font.
pub const MAX_LABEL_LEN: usize = 12;

/// A parameter line: which value it edits, how it is labelled, and how far
/// one tap moves it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParamBinding {
    pub id: ParamId,
    pub label: &'static str,
    /// Amount added or subtracted per directional command while editing.
    pub step: f32,
}

/// Non-parameter line actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Persist all values through
    /// [`ParameterRepository::commit_to_storage()`](brewpanel_params::parameters::ParameterRepository::commit_to_storage).
    Save,
    /// Close the menu once every button is released.
    Exit,
}

/// One selectable line of the menu.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuLine {
    Param(ParamBinding),
    Action {
        action: MenuAction,
        label: &'static str,
    },
}

impl MenuLine {
    /// Text shown for this line (before any value).
    pub fn label(&self) -> &'static str {
        match self {
            MenuLine::Param(binding) => binding.label,
            MenuLine::Action { label, .. } => label,
        }
    }

    /// The parameter binding, if this is a parameter line.
    pub fn binding(&self) -> Option<&ParamBinding> {
        match self {
            MenuLine::Param(binding) => Some(binding),
            MenuLine::Action { .. } => None,
        }
    }
}

/// The default espresso menu, top to bottom.
const STANDARD_LINES: [MenuLine; 6] = [
    MenuLine::Param(ParamBinding {
        id: ParamId::BrewSetpoint,
        label: "Brew Temp",
        step: 0.5,
    }),
    MenuLine::Param(ParamBinding {
        id: ParamId::BrewTime,
        label: "Brew Time",
        step: 1.0,
    }),
    MenuLine::Param(ParamBinding {
        id: ParamId::SteamSetpoint,
        label: "Steam Temp",
        step: 0.5,
    }),
    MenuLine::Param(ParamBinding {
        id: ParamId::PidKpRegular,
        label: "PID Kp",
        step: 1.0,
    }),
    MenuLine::Action {
        action: MenuAction::Save,
        label: "Save",
    },
    MenuLine::Action {
        action: MenuAction::Exit,
        label: "Exit",
    },
];

/// Ordered, fixed-capacity list of menu lines.
///
/// # Examples
///
/// ```
/// use brewpanel_menu::{MenuAction, MenuLines};
/// use brewpanel_params::parameters::ParamId;
///
/// let mut lines = MenuLines::new();
/// lines.register_param(ParamId::BrewSetpoint, "Brew Temp", 0.5).unwrap();
/// lines.register_action(MenuAction::Exit, "Exit").unwrap();
/// assert_eq!(lines.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MenuLines {
    lines: Vec<MenuLine, MAX_MENU_LINES>,
}

impl MenuLines {
    /// Create an empty menu.
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The standard menu: brew and steam temperatures, brew time, PID Kp,
    /// then Save and Exit.
    pub fn standard() -> Self {
        let mut menu = Self::new();
        for line in STANDARD_LINES {
            // STANDARD_LINES fits in MAX_MENU_LINES.
            let _ = menu.lines.push(line);
        }
        menu
    }

    /// Append a parameter line.
    ///
    /// # Errors
    /// * [`MenuError::InvalidStep`] if `step` is not a positive finite number.
    /// * [`MenuError::LabelTooLong`] if `label` exceeds [`MAX_LABEL_LEN`].
    /// * [`MenuError::DuplicateParam`] if `id` already has a line.
    /// * [`MenuError::TooManyLines`] if the menu is full.
    pub fn register_param(
        &mut self,
        id: ParamId,
        label: &'static str,
        step: f32,
    ) -> Result<(), MenuError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(MenuError::InvalidStep);
        }
        if self.iter().any(|l| l.binding().is_some_and(|b| b.id == id)) {
            return Err(MenuError::DuplicateParam);
        }
        self.push(MenuLine::Param(ParamBinding { id, label, step }))
    }

    /// Append an action line.
    ///
    /// # Errors
    /// * [`MenuError::LabelTooLong`] if `label` exceeds [`MAX_LABEL_LEN`].
    /// * [`MenuError::TooManyLines`] if the menu is full.
    pub fn register_action(
        &mut self,
        action: MenuAction,
        label: &'static str,
    ) -> Result<(), MenuError> {
        self.push(MenuLine::Action { action, label })
    }

    /// Line at `index`, top to bottom.
    pub fn get(&self, index: usize) -> Option<&MenuLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuLine> {
        self.lines.iter()
    }

    fn push(&mut self, line: MenuLine) -> Result<(), MenuError> {
        if line.label().len() > MAX_LABEL_LEN {
            return Err(MenuError::LabelTooLong);
        }
        self.lines.push(line).map_err(|_| MenuError::TooManyLines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_menu_layout() {
        let lines = MenuLines::standard();
        assert_eq!(lines.len(), STANDARD_LINES.len());
        assert_eq!(lines.get(0).map(MenuLine::label), Some("Brew Temp"));
        assert_eq!(
            lines.get(lines.len() - 1),
            Some(&MenuLine::Action { action: MenuAction::Exit, label: "Exit" })
        );
        for line in lines.iter() {
            assert!(line.label().len() <= MAX_LABEL_LEN);
        }
    }

    #[test]
    fn register_param_validates_step() {
        let mut lines = MenuLines::new();
        assert_eq!(lines.register_param(ParamId::BrewTime, "Time", 0.0), Err(MenuError::InvalidStep));
        assert_eq!(lines.register_param(ParamId::BrewTime, "Time", -1.0), Err(MenuError::InvalidStep));
        assert_eq!(lines.register_param(ParamId::BrewTime, "Time", f32::NAN), Err(MenuError::InvalidStep));
        assert!(lines.is_empty());
    }

    #[test]
    fn register_param_rejects_duplicates_and_long_labels() {
        let mut lines = MenuLines::new();
        lines.register_param(ParamId::BrewTime, "Time", 1.0).unwrap();
        assert_eq!(
            lines.register_param(ParamId::BrewTime, "Again", 1.0),
            Err(MenuError::DuplicateParam)
        );
        assert_eq!(
            lines.register_action(MenuAction::Save, "Save all values now"),
            Err(MenuError::LabelTooLong)
        );
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut lines = MenuLines::new();
        for id in ParamId::ALL.iter().take(MAX_MENU_LINES) {
            lines.register_param(*id, "P", 1.0).unwrap();
        }
        assert_eq!(lines.register_action(MenuAction::Exit, "Exit"), Err(MenuError::TooManyLines));
    }
}
