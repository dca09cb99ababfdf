use super::{ParamInfo, PARAM_COUNT, PARAM_INFO};

/// Identifier of a controller parameter.
///
/// The discriminant is the index into [`PARAM_INFO`] and the storage slot,
/// so variants are only ever appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ParamId {
    /// PID proportional gain, regular operation.
    PidKpRegular = 0,
    /// PID integral time (s), regular operation.
    PidTnRegular,
    /// PID derivative time (s), regular operation.
    PidTvRegular,
    /// Brew water temperature setpoint (°C).
    BrewSetpoint,
    /// Brew time (s).
    BrewTime,
    /// Pre-infusion time (s).
    PreInfusionTime,
    /// Pre-infusion pause (s).
    PreInfusionPause,
    /// PID proportional gain, brew detection phase.
    PidKpBrewDetect,
    /// PID integral time (s), brew detection phase.
    PidTnBrewDetect,
    /// PID derivative time (s), brew detection phase.
    PidTvBrewDetect,
    /// Brew software timer (s).
    BrewSwTimer,
    /// Brew detection threshold.
    BrewDetectThreshold,
    /// PID proportional gain, cold start phase.
    PidKpStart,
    /// PID integral time (s), cold start phase.
    PidTnStart,
    /// PID derivative time (s), cold start phase.
    PidTvStart,
    /// Steam temperature setpoint (°C).
    SteamSetpoint,
}

impl ParamId {
    /// Every parameter, in index order.
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::PidKpRegular,
        ParamId::PidTnRegular,
        ParamId::PidTvRegular,
        ParamId::BrewSetpoint,
        ParamId::BrewTime,
        ParamId::PreInfusionTime,
        ParamId::PreInfusionPause,
        ParamId::PidKpBrewDetect,
        ParamId::PidTnBrewDetect,
        ParamId::PidTvBrewDetect,
        ParamId::BrewSwTimer,
        ParamId::BrewDetectThreshold,
        ParamId::PidKpStart,
        ParamId::PidTnStart,
        ParamId::PidTvStart,
        ParamId::SteamSetpoint,
    ];

    /// Index into [`PARAM_INFO`] and per-parameter arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index()`](Self::index).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalogue entry (range and default).
    pub const fn info(self) -> ParamInfo {
        PARAM_INFO[self as usize]
    }

    /// Stable machine-readable key, e.g. for storage records or telemetry.
    pub const fn key(self) -> &'static str {
        match self {
            ParamId::PidKpRegular => "PID_KP_REGULAR",
            ParamId::PidTnRegular => "PID_TN_REGULAR",
            ParamId::PidTvRegular => "PID_TV_REGULAR",
            ParamId::BrewSetpoint => "BREW_SETPOINT",
            ParamId::BrewTime => "BREW_TIME",
            ParamId::PreInfusionTime => "PRE_INFUSION_TIME",
            ParamId::PreInfusionPause => "PRE_INFUSION_PAUSE",
            ParamId::PidKpBrewDetect => "PID_KP_BD",
            ParamId::PidTnBrewDetect => "PID_TN_BD",
            ParamId::PidTvBrewDetect => "PID_TV_BD",
            ParamId::BrewSwTimer => "BREW_SW_TIMER",
            ParamId::BrewDetectThreshold => "BD_THRESHOLD",
            ParamId::PidKpStart => "PID_KP_START",
            ParamId::PidTnStart => "PID_TN_START",
            ParamId::PidTvStart => "PID_TV_START",
            ParamId::SteamSetpoint => "STEAM_SETPOINT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_id() {
        for (i, id) in ParamId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(ParamId::from_index(i), Some(*id));
        }
        assert_eq!(ParamId::from_index(PARAM_COUNT), None);
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in ParamId::ALL.iter().enumerate() {
            for b in &ParamId::ALL[i + 1..] {
                assert_ne!(a.key(), b.key());
            }
        }
    }
}
