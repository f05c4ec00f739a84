/// In-memory snapshot storage
///
/// Clones share the same slot, so a caller can keep a handle and inspect
/// what the server saved.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::Snapshot;
use crate::storage::{SnapshotStorage, StorageError};

#[derive(Debug, Default)]
struct Slot {
    value: Option<serde_json::Value>,
    saves: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that starts out holding `value`
    pub fn with_value(value: serde_json::Value) -> Self {
        let storage = Self::new();
        storage.lock().value = Some(value);
        storage
    }

    /// The last saved (or seeded) document
    pub fn saved(&self) -> Option<serde_json::Value> {
        self.lock().value.clone()
    }

    /// How many times `save` was called
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A panic while holding the lock cannot leave the slot half-written
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.saved())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let value = serde_json::to_value(snapshot)?;
        let mut slot = self.lock();
        slot.value = Some(value);
        slot.saves += 1;
        Ok(())
    }
}
