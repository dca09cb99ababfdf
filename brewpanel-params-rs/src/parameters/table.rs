use heapless::Vec;

use super::error::ParameterError;
use super::parameter::{Parameter, ParameterSlot};
use super::repository::ParameterRepository;
use super::storage::ParameterStorage;
use super::{ParamId, PARAM_COUNT};

/// Describes a single parameter change, returned by
/// [`ParameterTable::take_control_changes()`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterChange {
    /// Which parameter changed.
    pub id: ParamId,
    /// Current value after the change.
    pub value: f32,
}

/// Changes collected by one call to
/// [`take_control_changes()`](ParameterTable::take_control_changes), in
/// [`ParamId`] order.
pub type ParameterChanges = Vec<ParameterChange, PARAM_COUNT>;

/// In-memory parameter repository backed by a [`ParameterStorage`].
///
/// Holds one [`ParameterSlot`] per [`ParamId`]. This is the shared
/// structure the firmware places behind a mutex: the menu edits it through
/// [`ParameterRepository`], the control loop drains it through
/// [`take_control_changes()`](Self::take_control_changes).
///
/// # Initialization
///
/// [`ParameterTable::new()`] registers every catalogued parameter at its
/// default. [`ParameterTable::empty()`] starts with all slots
/// [`Null`](ParameterSlot::Null) for machines that only use a subset; call
/// [`register()`](Self::register) for each one. Either way, call
/// [`load_from_storage()`](Self::load_from_storage) once at boot.
///
/// # Examples
///
/// ```
/// use brewpanel_params::parameters::{
///     MemoryStorage, ParamId, ParameterRepository, ParameterTable,
/// };
///
/// let mut table = ParameterTable::new(MemoryStorage::new());
/// table.set(ParamId::BrewSetpoint, 93.0).unwrap();
///
/// let changes = table.take_control_changes();
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].value, 93.0);
///
/// // Not persisted until an explicit commit.
/// assert_eq!(table.storage().record(ParamId::BrewSetpoint), None);
/// table.commit_to_storage().unwrap();
/// assert_eq!(table.storage().record(ParamId::BrewSetpoint), Some(93.0));
/// ```
pub struct ParameterTable<S> {
    slots: [ParameterSlot; PARAM_COUNT],
    storage: S,
}

impl<S: ParameterStorage> ParameterTable<S> {
    /// Create a table with every catalogued parameter registered at its
    /// factory default.
    pub fn new(storage: S) -> Self {
        let mut table = Self::empty(storage);
        for id in ParamId::ALL {
            table.register(id);
        }
        table
    }

    /// Create a table with every slot null.
    pub fn empty(storage: S) -> Self {
        Self {
            slots: [ParameterSlot::Null; PARAM_COUNT],
            storage,
        }
    }

    /// Register `id` at its factory default. Re-registering resets it.
    pub fn register(&mut self, id: ParamId) {
        self.slots[id.index()] = ParameterSlot::Active(Parameter::from_info(id.info()));
    }

    /// `true` if `id` is registered.
    pub fn is_registered(&self, id: ParamId) -> bool {
        self.slots[id.index()].is_active()
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The storage backend, mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    // ── Storage ──────────────────────────────────────────────────────

    /// Load every registered parameter from storage.
    ///
    /// Missing records keep the current value. Records outside the
    /// parameter's range are replaced by its default and logged. Every
    /// loaded parameter is flagged for the control loop.
    ///
    /// Returns the number of records that had to be replaced.
    ///
    /// # Errors
    /// * [`ParameterError::Storage`] on the first backend failure. Records
    ///   loaded before the failure are kept.
    pub fn load_from_storage(&mut self) -> Result<usize, ParameterError> {
        let mut replaced = 0;

        for id in ParamId::ALL {
            let ParameterSlot::Active(param) = &mut self.slots[id.index()] else {
                continue;
            };
            let Some(stored) = self.storage.load(id)? else {
                continue;
            };
            if !param.set_value_from_storage(stored) {
                #[cfg(feature = "defmt")]
                defmt::warn!("stored {} out of range, using default", id.key());
                replaced += 1;
            }
        }

        Ok(replaced)
    }

    /// Number of registered parameters not yet committed to storage.
    pub fn pending_storage_count(&self) -> usize {
        self.slots
            .iter()
            .filter_map(ParameterSlot::as_ref)
            .filter(|p| p.changed_storage)
            .count()
    }

    // ── Change consumption ───────────────────────────────────────────

    /// Collect all parameters whose control change flag is set, then clear
    /// those flags.
    ///
    /// Only clears `changed_control`; `changed_storage` is left intact.
    pub fn take_control_changes(&mut self) -> ParameterChanges {
        let mut changes = ParameterChanges::new();

        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let ParameterSlot::Active(param) = slot else {
                continue;
            };
            if !param.changed_control {
                continue;
            }
            if let Some(id) = ParamId::from_index(idx) {
                // One entry per slot, so capacity is never exceeded.
                let _ = changes.push(ParameterChange {
                    id,
                    value: param.value,
                });
            }
            param.changed_control = false;
        }

        changes
    }

    fn slot(&self, id: ParamId) -> Result<&Parameter, ParameterError> {
        self.slots[id.index()]
            .as_ref()
            .ok_or(ParameterError::NotFound(id))
    }

    fn slot_mut(&mut self, id: ParamId) -> Result<&mut Parameter, ParameterError> {
        self.slots[id.index()]
            .as_mut()
            .ok_or(ParameterError::NotFound(id))
    }
}

impl<S: ParameterStorage> ParameterRepository for ParameterTable<S> {
    fn get(&self, id: ParamId) -> Result<Parameter, ParameterError> {
        self.slot(id).copied()
    }

    fn set(&mut self, id: ParamId, value: f32) -> Result<(), ParameterError> {
        let param = self.slot_mut(id)?;
        if param.set_value(value) {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("rejected {} for {}", value, id.key());
            Err(ParameterError::OutOfRange(id))
        }
    }

    /// Write every registered value whose storage flag is set, then flush.
    ///
    /// A flag is only cleared once its record has been stored, so a failed
    /// commit can be retried and writes only what is still outstanding.
    fn commit_to_storage(&mut self) -> Result<(), ParameterError> {
        for id in ParamId::ALL {
            let ParameterSlot::Active(param) = &mut self.slots[id.index()] else {
                continue;
            };
            if !param.changed_storage {
                continue;
            }
            self.storage.store(id, param.value)?;
            param.changed_storage = false;
        }

        self.storage.flush()?;

        #[cfg(feature = "defmt")]
        defmt::info!("parameters committed to storage");
        Ok(())
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{MemoryStorage, StorageError};

    /// Storage double that fails on demand and counts flushes.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_load: bool,
        fail_store_of: Option<ParamId>,
        fail_flush: bool,
        flushes: usize,
    }

    impl ParameterStorage for FlakyStorage {
        fn load(&mut self, id: ParamId) -> Result<Option<f32>, StorageError> {
            if self.fail_load {
                return Err(StorageError::ReadFailed);
            }
            self.inner.load(id)
        }

        fn store(&mut self, id: ParamId, value: f32) -> Result<(), StorageError> {
            if self.fail_store_of == Some(id) {
                return Err(StorageError::WriteFailed);
            }
            self.inner.store(id, value)
        }

        fn flush(&mut self) -> Result<(), StorageError> {
            if self.fail_flush {
                return Err(StorageError::Unavailable);
            }
            self.flushes += 1;
            Ok(())
        }
    }

    // ── Default state ────────────────────────────────────────────────

    #[test]
    fn new_registers_every_parameter_at_default() {
        let mut table = ParameterTable::new(MemoryStorage::new());
        for id in ParamId::ALL {
            assert!(table.is_registered(id));
            assert_eq!(table.get(id).unwrap().value, id.info().default);
        }
        assert!(table.take_control_changes().is_empty());
        assert_eq!(table.pending_storage_count(), 0);
    }

    #[test]
    fn empty_table_reports_not_found() {
        let mut table = ParameterTable::empty(MemoryStorage::new());
        assert_eq!(
            table.get(ParamId::BrewSetpoint),
            Err(ParameterError::NotFound(ParamId::BrewSetpoint))
        );
        assert_eq!(
            table.set(ParamId::BrewSetpoint, 90.0),
            Err(ParameterError::NotFound(ParamId::BrewSetpoint))
        );

        table.register(ParamId::BrewSetpoint);
        assert_eq!(table.get(ParamId::BrewSetpoint).unwrap().value, 95.0);
        assert!(!table.is_registered(ParamId::SteamSetpoint));
    }

    // ── Set ──────────────────────────────────────────────────────────

    #[test]
    fn set_within_range_flags_both_consumers() {
        let mut table = ParameterTable::new(MemoryStorage::new());
        table.set(ParamId::BrewTime, 30.0).unwrap();

        let param = table.get(ParamId::BrewTime).unwrap();
        assert_eq!(param.value, 30.0);
        assert!(param.changed_control);
        assert!(param.changed_storage);
        assert_eq!(table.pending_storage_count(), 1);
    }

    #[test]
    fn set_out_of_range_is_rejected_without_side_effects() {
        let mut table = ParameterTable::new(MemoryStorage::new());
        assert_eq!(
            table.set(ParamId::BrewSetpoint, 100.0),
            Err(ParameterError::OutOfRange(ParamId::BrewSetpoint))
        );
        assert_eq!(
            table.set(ParamId::BrewSetpoint, f32::NAN),
            Err(ParameterError::OutOfRange(ParamId::BrewSetpoint))
        );
        assert_eq!(table.get(ParamId::BrewSetpoint).unwrap().value, 95.0);
        assert!(table.take_control_changes().is_empty());
    }

    #[test]
    fn set_accepts_exact_bounds() {
        let mut table = ParameterTable::new(MemoryStorage::new());
        assert!(table.set(ParamId::BrewSetpoint, 85.0).is_ok());
        assert!(table.set(ParamId::BrewSetpoint, 99.0).is_ok());
    }

    // ── Change consumption ───────────────────────────────────────────

    #[test]
    fn take_control_changes_clears_only_control_flag() {
        let mut table = ParameterTable::new(MemoryStorage::new());
        table.set(ParamId::SteamSetpoint, 130.0).unwrap();
        table.set(ParamId::BrewSetpoint, 92.0).unwrap();

        let changes = table.take_control_changes();
        assert_eq!(changes.len(), 2);
        // Collected in ParamId order.
        assert_eq!(changes[0], ParameterChange { id: ParamId::BrewSetpoint, value: 92.0 });
        assert_eq!(changes[1], ParameterChange { id: ParamId::SteamSetpoint, value: 130.0 });

        assert!(table.take_control_changes().is_empty());
        assert_eq!(table.pending_storage_count(), 2);
    }

    // ── Commit ───────────────────────────────────────────────────────

    #[test]
    fn commit_persists_dirty_values_and_clears_storage_flags() {
        let mut table = ParameterTable::new(FlakyStorage::default());
        table.set(ParamId::BrewTime, 28.0).unwrap();

        table.commit_to_storage().unwrap();
        assert_eq!(table.storage().inner.record(ParamId::BrewTime), Some(28.0));
        // Untouched parameters are not written.
        assert_eq!(table.storage().inner.record(ParamId::BrewSetpoint), None);
        assert_eq!(table.storage().flushes, 1);
        assert_eq!(table.pending_storage_count(), 0);
        // Control flag untouched by commit.
        assert_eq!(table.take_control_changes().len(), 1);
    }

    #[test]
    fn failed_store_keeps_flag_for_retry() {
        let mut table = ParameterTable::new(FlakyStorage::default());
        table.set(ParamId::BrewSetpoint, 90.0).unwrap();
        table.set(ParamId::SteamSetpoint, 125.0).unwrap();
        table.storage_mut().fail_store_of = Some(ParamId::SteamSetpoint);

        assert_eq!(
            table.commit_to_storage(),
            Err(ParameterError::Storage(StorageError::WriteFailed))
        );
        // The earlier record made it; the failing one is still pending.
        assert_eq!(table.storage().inner.record(ParamId::BrewSetpoint), Some(90.0));
        assert_eq!(table.pending_storage_count(), 1);
        assert_eq!(table.storage().flushes, 0);

        table.storage_mut().fail_store_of = None;
        table.commit_to_storage().unwrap();
        assert_eq!(table.storage().inner.record(ParamId::SteamSetpoint), Some(125.0));
        assert_eq!(table.pending_storage_count(), 0);
    }

    #[test]
    fn failed_flush_is_reported() {
        let mut table = ParameterTable::new(FlakyStorage::default());
        table.storage_mut().fail_flush = true;
        assert_eq!(
            table.commit_to_storage(),
            Err(ParameterError::Storage(StorageError::Unavailable))
        );
    }

    // ── Load ─────────────────────────────────────────────────────────

    #[test]
    fn load_applies_records_and_flags_control_only() {
        let mut storage = MemoryStorage::new();
        storage.store(ParamId::BrewSetpoint, 93.0).unwrap();
        let mut table = ParameterTable::new(storage);

        assert_eq!(table.load_from_storage(), Ok(0));
        assert_eq!(table.get(ParamId::BrewSetpoint).unwrap().value, 93.0);
        // Missing records keep their defaults.
        assert_eq!(table.get(ParamId::BrewTime).unwrap().value, 25.0);
        assert_eq!(table.pending_storage_count(), 0);

        let changes = table.take_control_changes();
        assert_eq!(changes.as_slice(), &[ParameterChange { id: ParamId::BrewSetpoint, value: 93.0 }]);
    }

    #[test]
    fn load_replaces_out_of_range_records_with_default() {
        let mut storage = MemoryStorage::new();
        storage.store(ParamId::SteamSetpoint, 500.0).unwrap();
        storage.store(ParamId::BrewTime, f32::NAN).unwrap();
        let mut table = ParameterTable::new(storage);

        assert_eq!(table.load_from_storage(), Ok(2));
        assert_eq!(table.get(ParamId::SteamSetpoint).unwrap().value, 120.0);
        assert_eq!(table.get(ParamId::BrewTime).unwrap().value, 25.0);
    }

    #[test]
    fn load_skips_unregistered_parameters() {
        let mut storage = MemoryStorage::new();
        storage.store(ParamId::BrewSetpoint, 93.0).unwrap();
        let mut table = ParameterTable::empty(storage);

        assert_eq!(table.load_from_storage(), Ok(0));
        assert!(table.take_control_changes().is_empty());
    }

    #[test]
    fn load_failure_is_reported() {
        let mut table = ParameterTable::new(FlakyStorage {
            fail_load: true,
            ..Default::default()
        });
        assert_eq!(
            table.load_from_storage(),
            Err(ParameterError::Storage(StorageError::ReadFailed))
        );
    }
}
