use super::ParamInfo;

/// Individual controller parameter with value, range, and change tracking.
///
/// `value` is always within `[min, max]`: [`set_value()`](Self::set_value)
/// rejects anything else, and stored values that fail the check are
/// replaced by the default on load.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parameter {
    /// Current value, always within `[min, max]`.
    pub value: f32,
    /// Minimum allowed value (inclusive).
    pub min: f32,
    /// Maximum allowed value (inclusive).
    pub max: f32,
    /// Factory default.
    pub default: f32,
    /// Value has not yet been committed to non-volatile storage.
    pub changed_storage: bool,
    /// Value has not yet been picked up by the control loop.
    pub changed_control: bool,
}

impl Parameter {
    /// Create a parameter at its default value with no pending changes.
    pub const fn from_info(info: ParamInfo) -> Self {
        Self {
            value: info.default,
            min: info.min,
            max: info.max,
            default: info.default,
            changed_storage: false,
            changed_control: false,
        }
    }

    /// `true` if `v` lies within `[min, max]`. Always `false` for NaN.
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Update the value from a local edit.
    ///
    /// Sets **both** change flags, since the new value must reach storage
    /// on the next commit and the control loop on its next poll. Returns
    /// `false` and leaves the parameter untouched if `v` is out of range.
    pub fn set_value(&mut self, v: f32) -> bool {
        if !self.contains(v) {
            return false;
        }
        self.value = v;
        self.changed_storage = true;
        self.changed_control = true;
        true
    }

    /// Update the value from non-volatile storage.
    ///
    /// Sets **only** `changed_control`: the value already matches storage.
    /// An out-of-range or NaN record is replaced by the default. Returns
    /// `false` in that case.
    pub fn set_value_from_storage(&mut self, v: f32) -> bool {
        let valid = self.contains(v);
        self.value = if valid { v } else { self.default };
        self.changed_control = true;
        // Intentionally do NOT set changed_storage; a replaced record is
        // rewritten on the next explicit save.
        valid
    }

    /// `value + delta`, jumping to the opposite bound when it leaves the
    /// range: below `min` yields exactly `max`, above `max` exactly `min`.
    ///
    /// See [`step_raw()`](Self::step_raw) for how rounding error is kept
    /// away from the bounds.
    pub fn step_wrapping(&self, value: f32, delta: f32) -> f32 {
        let next = self.step_raw(value, delta);
        let tolerance = delta.abs() * STEP_TOLERANCE;
        if next < self.min - tolerance {
            self.max
        } else if next > self.max + tolerance {
            self.min
        } else {
            self.snap_to_bounds(next, tolerance)
        }
    }

    /// `value + delta`, held at the nearest bound when it leaves the range.
    pub fn step_clamped(&self, value: f32, delta: f32) -> f32 {
        let next = self.step_raw(value, delta);
        self.snap_to_bounds(next, delta.abs() * STEP_TOLERANCE)
    }

    /// `value + delta` without a range check.
    ///
    /// A value on the `min + n * |delta|` grid is stepped by recomputing
    /// from `min`, so repeated fractional steps (0.1, 0.25) do not
    /// accumulate error and land on the bounds exactly. Off-grid values use
    /// plain addition.
    fn step_raw(&self, value: f32, delta: f32) -> f32 {
        let step = delta.abs();
        if step == 0.0 || !value.is_finite() || value < self.min {
            return value + delta;
        }

        let units = (value - self.min) / step;
        // `units` is non-negative, so adding 0.5 and truncating rounds.
        let nearest = (units + 0.5) as u32;
        if (units - nearest as f32).abs() > STEP_TOLERANCE {
            return value + delta;
        }

        let next = if delta > 0.0 {
            nearest.saturating_add(1)
        } else if nearest == 0 {
            // One step below `min`.
            return self.min - step;
        } else {
            nearest - 1
        };
        self.min + next as f32 * step
    }

    /// Clamp into `[min, max]`, landing exactly on a bound within `tolerance`.
    fn snap_to_bounds(&self, value: f32, tolerance: f32) -> f32 {
        if value <= self.min + tolerance {
            self.min
        } else if value >= self.max - tolerance {
            self.max
        } else {
            value
        }
    }
}

/// Fraction of a step treated as rounding error at the range bounds.
const STEP_TOLERANCE: f32 = 1e-3;

/// A parameter slot that is either registered (holding a [`Parameter`]) or
/// null.
///
/// A repository always has one slot per [`ParamId`](super::ParamId), but a
/// given machine may not use every parameter. Operations on a `Null` slot
/// fail with [`ParameterError::NotFound`](super::ParameterError::NotFound).
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterSlot {
    /// Registered parameter.
    Active(Parameter),
    /// Unregistered: reads and writes report not found.
    #[default]
    Null,
}

impl ParameterSlot {
    /// Returns `true` if this slot holds a registered parameter.
    pub fn is_active(&self) -> bool {
        matches!(self, ParameterSlot::Active(_))
    }

    /// Returns the inner [`Parameter`], or `None` for a null slot.
    pub fn as_ref(&self) -> Option<&Parameter> {
        match self {
            ParameterSlot::Active(param) => Some(param),
            ParameterSlot::Null => None,
        }
    }

    /// Returns the inner [`Parameter`] mutably, or `None` for a null slot.
    pub fn as_mut(&mut self) -> Option<&mut Parameter> {
        match self {
            ParameterSlot::Active(param) => Some(param),
            ParameterSlot::Null => None,
        }
    }
}
