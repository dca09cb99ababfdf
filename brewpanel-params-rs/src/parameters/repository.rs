use super::{ParamId, Parameter, ParameterError};

/// Read/write access to the authoritative parameter values.
///
/// The menu never owns parameter values; it goes through this trait for
/// every read and for the final write of an edit. Implementations must keep
/// `min <= value <= max` for every parameter they return.
///
/// [`ParameterTable`](super::ParameterTable) is the in-memory
/// implementation used by the firmware.
pub trait ParameterRepository {
    /// Current value, range and default of `id`.
    ///
    /// # Errors
    /// * [`ParameterError::NotFound`] if `id` is not registered.
    fn get(&self, id: ParamId) -> Result<Parameter, ParameterError>;

    /// Replace the in-memory value of `id`.
    ///
    /// Does **not** persist; see [`commit_to_storage()`](Self::commit_to_storage).
    ///
    /// # Errors
    /// * [`ParameterError::NotFound`] if `id` is not registered.
    /// * [`ParameterError::OutOfRange`] if `value` is outside `[min, max]`.
    fn set(&mut self, id: ParamId, value: f32) -> Result<(), ParameterError>;

    /// Persist every in-memory value to non-volatile storage.
    ///
    /// Invoked only on an explicit user save, not on every edit.
    ///
    /// # Errors
    /// * [`ParameterError::Storage`] if the backend fails.
    fn commit_to_storage(&mut self) -> Result<(), ParameterError>;
}
