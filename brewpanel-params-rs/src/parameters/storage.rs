use super::{ParamId, StorageError, PARAM_COUNT};

/// Non-volatile storage backend for parameter values.
///
/// One record per [`ParamId`]. Backends decide the physical layout (EEPROM
/// offsets, flash key/value pages); the repository only needs load and
/// store by id.
pub trait ParameterStorage {
    /// Read the stored value of `id`. `Ok(None)` means no record exists
    /// yet (first boot).
    fn load(&mut self, id: ParamId) -> Result<Option<f32>, StorageError>;

    /// Write the value of `id`.
    fn store(&mut self, id: ParamId, value: f32) -> Result<(), StorageError>;

    /// Make all stored records durable. Called once at the end of a commit.
    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// RAM-backed storage. Values survive until reset.
///
/// Used by host tests and as the firmware backend until a flash-backed
/// implementation is wired in.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: [Option<f32>; PARAM_COUNT],
}

impl MemoryStorage {
    /// Create an empty store (no records).
    pub const fn new() -> Self {
        Self {
            records: [None; PARAM_COUNT],
        }
    }

    /// Stored value of `id`, if any.
    pub fn record(&self, id: ParamId) -> Option<f32> {
        self.records[id.index()]
    }
}

impl ParameterStorage for MemoryStorage {
    fn load(&mut self, id: ParamId) -> Result<Option<f32>, StorageError> {
        Ok(self.records[id.index()])
    }

    fn store(&mut self, id: ParamId, value: f32) -> Result<(), StorageError> {
        self.records[id.index()] = Some(value);
        Ok(())
    }
}
