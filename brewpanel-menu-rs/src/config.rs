//! Menu behaviour configuration.

use brewpanel_input::DebounceConfig;

/// What happens to an open edit session when the menu closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExitPolicy {
    /// Drop the snapshot. The repository keeps its previous value.
    #[default]
    Discard,
    /// Write the snapshot to the repository as if the user had confirmed it.
    Commit,
}

/// How a value being edited behaves at its range limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Boundary {
    /// Stepping past `max` lands on `min` and vice versa.
    #[default]
    Wrap,
    /// Stepping past a limit stays on that limit.
    Clamp,
}

/// Configuration for a [`MenuController`](crate::MenuController).
///
/// [`MenuConfig::default()`] gives the shipped behaviour: 20 ms debounce,
/// 600 ms hold, discard on exit, wraparound at limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuConfig {
    /// Button timing.
    pub debounce: DebounceConfig,
    /// Fate of an open edit session when the menu closes.
    pub exit_policy: ExitPolicy,
    /// Limit behaviour while editing.
    pub boundary: Boundary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = MenuConfig::default();
        assert_eq!(c.debounce.debounce_ms, 20);
        assert_eq!(c.debounce.hold_ms, 600);
        assert_eq!(c.exit_policy, ExitPolicy::Discard);
        assert_eq!(c.boundary, Boundary::Wrap);
    }
}
