//! In-memory backend for the remote record store.
//!
//! Each batch is applied to a copy of the map, which replaces the live
//! map only if every record was accepted.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::errors::{LockVaultError, Result};

use super::repository::{RecordDeleter, RecordReader, RecordUpserter, StoredRecord};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    rows: RwLock<BTreeMap<String, StoredRecord>>,
}

impl MemoryRepository {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records across all owners.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read_rows()?.len())
    }

    /// Returns `true` if no owner has any record stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_rows()?.is_empty())
    }

    fn read_rows(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, StoredRecord>>> {
        self.rows
            .read()
            .map_err(|e| LockVaultError::Storage(format!("lock poisoned: {e}")))
    }

    fn write_rows(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, StoredRecord>>> {
        self.rows
            .write()
            .map_err(|e| LockVaultError::Storage(format!("lock poisoned: {e}")))
    }

    /// Apply `step` to a working copy for each record; swap it in only if
    /// no step failed.
    fn apply_batch<F>(&self, op: &str, records: &[StoredRecord], step: F) -> Result<()>
    where
        F: Fn(&mut BTreeMap<String, StoredRecord>, &StoredRecord) -> Result<()>,
    {
        let mut live = self.write_rows()?;
        let mut working = live.clone();
        for record in records {
            if let Err(e) = step(&mut working, record) {
                warn!(op, data_id = %record.data_id, error = %e, "batch rejected");
                return Err(e);
            }
        }
        *live = working;
        debug!(op, records = records.len(), "batch applied");
        Ok(())
    }
}

impl RecordUpserter for MemoryRepository {
    fn upsert(&self, records: &[StoredRecord]) -> Result<()> {
        self.apply_batch("upsert", records, |rows, incoming| {
            if incoming.data.is_empty() {
                return Err(LockVaultError::Storage(format!(
                    "upsert: record '{}' has empty data",
                    incoming.data_id
                )));
            }
            match rows.entry(incoming.data_id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(incoming.clone());
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    if existing.owner_id == incoming.owner_id
                        && existing.modified_at < incoming.modified_at
                    {
                        existing.data = incoming.data.clone();
                        existing.modified_at = incoming.modified_at;
                    }
                }
            }
            Ok(())
        })
    }
}

impl RecordDeleter for MemoryRepository {
    fn delete(&self, records: &[StoredRecord]) -> Result<()> {
        self.apply_batch("delete", records, |rows, incoming| {
            let should_remove = rows.get(&incoming.data_id).is_some_and(|existing| {
                existing.owner_id == incoming.owner_id
                    && existing.modified_at < incoming.modified_at
            });
            if should_remove {
                rows.remove(&incoming.data_id);
            }
            Ok(())
        })
    }
}

impl RecordReader for MemoryRepository {
    fn read(&self, owner_id: &str) -> Result<Vec<StoredRecord>> {
        Ok(self
            .read_rows()?
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
