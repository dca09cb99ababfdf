//! Menu visibility hysteresis.

/// Whether the interactive menu is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    #[default]
    Disabled,
    Enabled,
}

/// A state change reported by [`MenuActivationGate::update()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateTransition {
    Enabled,
    Disabled,
}

/// Opens the menu on a press-then-full-release gesture and closes it on an
/// exit request, again only once every button is released.
///
/// Waiting for a full release keeps a bounce or a hold that is still in
/// progress from opening the menu, and keeps the press that chose "Exit"
/// from acting on whatever is shown after the menu closes.
///
/// # Examples
///
/// ```
/// use brewpanel_menu::{GateTransition, MenuActivationGate};
///
/// let mut gate = MenuActivationGate::new();
/// assert_eq!(gate.update(true, false), None); // pressed: pending
/// assert_eq!(gate.update(false, true), Some(GateTransition::Enabled));
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuActivationGate {
    state: GateState,
    activation_pending: bool,
    exit_requested: bool,
}

impl MenuActivationGate {
    /// Create a disabled gate.
    pub const fn new() -> Self {
        Self {
            state: GateState::Disabled,
            activation_pending: false,
            exit_requested: false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == GateState::Enabled
    }

    /// `true` while an exit has been requested but buttons are still down.
    pub fn is_exit_pending(&self) -> bool {
        self.exit_requested
    }

    /// `true` after a press has been seen while disabled.
    pub fn is_activation_pending(&self) -> bool {
        self.activation_pending
    }

    /// Ask the gate to close at the next tick with every button released.
    ///
    /// Returns `false` (and does nothing) when the gate is already disabled.
    pub fn request_exit(&mut self) -> bool {
        if self.state == GateState::Disabled {
            return false;
        }
        self.exit_requested = true;
        true
    }

    /// Feed one tick of button observations.
    ///
    /// * `any_active`: at least one button is pressed or held.
    /// * `all_released`: every button is confirmed released.
    pub fn update(&mut self, any_active: bool, all_released: bool) -> Option<GateTransition> {
        match self.state {
            GateState::Disabled => {
                // The release must come in a later tick than the press.
                if self.activation_pending && all_released {
                    self.state = GateState::Enabled;
                    self.activation_pending = false;
                    self.exit_requested = false;
                    #[cfg(feature = "defmt")]
                    defmt::info!("menu enabled");
                    return Some(GateTransition::Enabled);
                }
                if any_active {
                    self.activation_pending = true;
                }
                None
            }
            GateState::Enabled => {
                if self.exit_requested && all_released {
                    self.state = GateState::Disabled;
                    self.exit_requested = false;
                    self.activation_pending = false;
                    #[cfg(feature = "defmt")]
                    defmt::info!("menu disabled");
                    return Some(GateTransition::Disabled);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_gate_stays_disabled() {
        let mut gate = MenuActivationGate::new();
        for _ in 0..10 {
            assert_eq!(gate.update(false, true), None);
        }
        assert!(!gate.is_enabled());
    }

    #[test]
    fn sustained_press_never_enables() {
        let mut gate = MenuActivationGate::new();
        for _ in 0..100 {
            assert_eq!(gate.update(true, false), None);
        }
        assert!(gate.is_activation_pending());
        assert!(!gate.is_enabled());
    }

    #[test]
    fn press_then_release_enables() {
        let mut gate = MenuActivationGate::new();
        gate.update(true, false);
        assert_eq!(gate.update(false, true), Some(GateTransition::Enabled));
        assert!(gate.is_enabled());
        assert!(!gate.is_activation_pending());
    }

    #[test]
    fn unknown_buttons_do_not_complete_gesture() {
        let mut gate = MenuActivationGate::new();
        gate.update(true, false);
        // Neither active nor confirmed released.
        assert_eq!(gate.update(false, false), None);
        assert_eq!(gate.update(false, true), Some(GateTransition::Enabled));
    }

    #[test]
    fn exit_waits_for_full_release() {
        let mut gate = MenuActivationGate::new();
        gate.update(true, false);
        gate.update(false, true);

        assert!(gate.request_exit());
        assert!(gate.is_exit_pending());
        assert_eq!(gate.update(true, false), None);
        assert!(gate.is_enabled());
        assert_eq!(gate.update(false, true), Some(GateTransition::Disabled));
        assert!(!gate.is_exit_pending());
    }

    #[test]
    fn enabled_without_exit_request_stays_enabled() {
        let mut gate = MenuActivationGate::new();
        gate.update(true, false);
        gate.update(false, true);
        assert_eq!(gate.update(false, true), None);
        assert_eq!(gate.update(true, false), None);
        assert!(gate.is_enabled());
    }

    #[test]
    fn exit_request_while_disabled_is_ignored() {
        let mut gate = MenuActivationGate::new();
        assert!(!gate.request_exit());
        assert_eq!(gate.update(false, true), None);
    }

    #[test]
    fn reactivation_needs_a_new_gesture() {
        let mut gate = MenuActivationGate::new();
        gate.update(true, false);
        gate.update(false, true);
        gate.request_exit();
        gate.update(false, true);
        assert!(!gate.is_enabled());

        assert_eq!(gate.update(false, true), None);
        gate.update(true, false);
        assert_eq!(gate.update(false, true), Some(GateTransition::Enabled));
    }
}
