//! Controller parameter management.
//!
//! This module provides the [`ParameterTable`] repository that owns the
//! live values of every bounded operating parameter (setpoints, PID gains,
//! brew timings). It is the shared state read by the control loop and
//! edited through the display menu.
//!
//! # Catalogue
//!
//! Every parameter is identified by a [`ParamId`]. Its range and factory
//! default live in the static [`PARAM_INFO`] table, indexed by
//! [`ParamId::index()`]:
//!
//! ```text
//! PID regular:   [Kp] [Tn] [Tv]
//! Brew:          [Setpoint] [Time] [Pre-infusion time] [Pre-infusion pause]
//! Brew detect:   [Kp] [Tn] [Tv] [SW timer] [Threshold]
//! Cold start:    [Kp] [Tn] [Tv]
//! Steam:         [Setpoint]
//! ```
//!
//! # Change Tracking
//!
//! Each parameter carries two independent change flags:
//!
//! - **`changed_storage`** — value differs from what was last committed to
//!   non-volatile storage. Set by [`ParameterRepository::set()`], cleared by
//!   [`ParameterRepository::commit_to_storage()`].
//! - **`changed_control`** — the control loop has not yet picked up the
//!   value. Set by `set()` and by loading from storage, cleared by
//!   [`ParameterTable::take_control_changes()`].
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Storage is a fixed array sized by [`PARAM_COUNT`].
//! The optional `defmt` feature enables structured logging.

mod error;
mod id;
mod parameter;
mod repository;
mod storage;
mod table;

pub use error::{ParameterError, StorageError};
pub use id::ParamId;
pub use parameter::{Parameter, ParameterSlot};
pub use repository::ParameterRepository;
pub use storage::{MemoryStorage, ParameterStorage};
pub use table::{ParameterChange, ParameterChanges, ParameterTable};

/// Number of parameters in the catalogue.
pub const PARAM_COUNT: usize = 16;

/// Range and factory default of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParamInfo {
    /// Minimum allowed value (inclusive).
    pub min: f32,
    /// Maximum allowed value (inclusive).
    pub max: f32,
    /// Factory default, within `[min, max]`.
    pub default: f32,
}

impl ParamInfo {
    const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }
}

/// Ranges and defaults indexed by [`ParamId::index()`].
///
/// **Invariant:** the order matches [`ParamId::ALL`]. New parameters are
/// appended to both, never inserted, because the index is also the storage
/// slot.
pub const PARAM_INFO: [ParamInfo; PARAM_COUNT] = [
    // PID, regular operation
    ParamInfo::new(0.0, 200.0, 62.0),
    ParamInfo::new(0.0, 999.0, 52.0),
    ParamInfo::new(0.0, 999.0, 11.5),
    // Brew
    ParamInfo::new(85.0, 99.0, 95.0),
    ParamInfo::new(0.0, 60.0, 25.0),
    ParamInfo::new(0.0, 10.0, 2.0),
    ParamInfo::new(0.0, 20.0, 5.0),
    // PID, brew detection phase
    ParamInfo::new(0.0, 200.0, 50.0),
    ParamInfo::new(0.0, 999.0, 0.0),
    ParamInfo::new(0.0, 999.0, 20.0),
    ParamInfo::new(0.0, 200.0, 45.0),
    ParamInfo::new(0.0, 999.0, 35.0),
    // PID, cold start phase
    ParamInfo::new(0.0, 200.0, 100.0),
    ParamInfo::new(0.0, 999.0, 0.0),
    ParamInfo::new(0.0, 999.0, 20.0),
    // Steam
    ParamInfo::new(100.0, 140.0, 120.0),
];
