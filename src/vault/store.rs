//! High-level vault operations used by CLI commands and the sync engine.
//!
//! `LocalVault` wraps the file format and the record model so callers
//! can work with simple calls like `vault.create(&data)`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::crypto::KeyManager;
use crate::errors::{LockVaultError, Result};
use crate::record::{Record, RecordStatus, SecretData};

use super::format;

/// The client's persistent record set.
pub struct LocalVault {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Records keyed by id (plaintext payloads).
    records: BTreeMap<String, Record>,
}

impl LocalVault {
    // ------------------------------------------------------------------
    // Construction and persistence
    // ------------------------------------------------------------------

    /// Open the vault at `path`.  A missing file is an empty vault.
    pub fn open(path: &Path, keys: &KeyManager) -> Result<Self> {
        let records = if path.exists() {
            Self::load(path, keys)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Read and decrypt every record in the vault file.
    pub fn load(path: &Path, keys: &KeyManager) -> Result<BTreeMap<String, Record>> {
        format::read_vault(path, keys)
    }

    /// Encrypt `records` and write them to `path`.
    pub fn save_records(records: &[Record], path: &Path, keys: &KeyManager) -> Result<()> {
        format::write_vault(path, records, keys)
    }

    /// Persist the current record set.
    pub fn save(&self, keys: &KeyManager) -> Result<()> {
        let records: Vec<Record> = self.records.values().cloned().collect();
        Self::save_records(&records, &self.path, keys)
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Add a new record and return its id.
    pub fn create(&mut self, data: &SecretData) -> Result<String> {
        let record = Record::new(data)?;
        let id = record.id.clone();
        info!(id = %id, kind = %record.kind, "record created");
        self.records.insert(id.clone(), record);
        Ok(id)
    }

    /// Replace the payload of an existing record.
    pub fn edit(&mut self, id: &str, data: &SecretData) -> Result<()> {
        let record = self.live_record_mut(id)?;
        record.update(data)?;
        info!(id = %id, "record modified");
        Ok(())
    }

    /// Mark a record as deleted.  It stays in the set until a sync
    /// confirms the removal.
    pub fn mark_deleted(&mut self, id: &str) -> Result<()> {
        let record = self.live_record_mut(id)?;
        record.mark_deleted();
        info!(id = %id, "record marked deleted");
        Ok(())
    }

    /// Swap in an entirely new record set (used after a sync pull).
    pub fn replace_all(&mut self, records: BTreeMap<String, Record>) {
        self.records = records;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Look up a record by id, including ones marked deleted.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// All records, ordered by id.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Number of records, pending deletes included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the vault holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records a sync would push.
    pub fn pending_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.status.is_pending())
            .count()
    }

    /// Returns the path to the vault file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn live_record_mut(&mut self, id: &str) -> Result<&mut Record> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| LockVaultError::RecordNotFound(id.to_string()))?;
        if record.status == RecordStatus::Deleted {
            return Err(LockVaultError::RecordDeleted(id.to_string()));
        }
        Ok(record)
    }
}
