use core::fmt;

use super::ParamId;

/// Errors reported by a [`ParameterStorage`](super::ParameterStorage) backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The backend could not be reached (not mounted, bus error).
    Unavailable,
    /// A record could not be read back.
    ReadFailed,
    /// A record could not be written.
    WriteFailed,
}

/// Errors that can occur when working with parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterError {
    /// The parameter is not registered in this repository.
    NotFound(ParamId),
    /// The value lies outside the parameter's `[min, max]` range (or is NaN).
    OutOfRange(ParamId),
    /// The storage backend failed.
    Storage(StorageError),
}

impl From<StorageError> for ParameterError {
    fn from(e: StorageError) -> Self {
        ParameterError::Storage(e)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::ReadFailed => write!(f, "storage read failed"),
            StorageError::WriteFailed => write!(f, "storage write failed"),
        }
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParameterError::NotFound(id) => write!(f, "parameter {} not registered", id.key()),
            ParameterError::OutOfRange(id) => write!(f, "value out of range for {}", id.key()),
            ParameterError::Storage(e) => write!(f, "{}", e),
        }
    }
}
