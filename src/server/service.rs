//! Remote-side sync service: splits an incoming batch by status and
//! hands each half to the storage capabilities.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{LockVaultError, Result};
use crate::record::{RecordKind, RecordStatus};
use crate::sync::models::WireRecord;

use super::repository::{RecordDeleter, RecordReader, RecordUpserter, StoredRecord};

pub struct DataService {
    upserter: Arc<dyn RecordUpserter>,
    reader: Arc<dyn RecordReader>,
    deleter: Arc<dyn RecordDeleter>,
}

impl DataService {
    pub fn new(
        upserter: Arc<dyn RecordUpserter>,
        reader: Arc<dyn RecordReader>,
        deleter: Arc<dyn RecordDeleter>,
    ) -> Self {
        Self {
            upserter,
            reader,
            deleter,
        }
    }

    /// Wire all three capabilities from one backend.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: RecordUpserter + RecordReader + RecordDeleter + 'static,
    {
        Self::new(backend.clone(), backend.clone(), backend)
    }

    /// Apply one client push for `owner_id`.
    ///
    /// Records with status `deleted` go to the delete batch, everything
    /// else to the upsert batch.  Upserts run first; the two batches are
    /// separate transactions.
    pub fn sync_changes(&self, owner_id: &str, changes: Vec<WireRecord>) -> Result<()> {
        let mut to_upsert = Vec::new();
        let mut to_delete = Vec::new();
        for change in changes {
            let deleted = change.status == RecordStatus::Deleted;
            let stored = into_stored(owner_id, change)?;
            if deleted {
                to_delete.push(stored);
            } else {
                to_upsert.push(stored);
            }
        }

        debug!(
            owner = owner_id,
            upserts = to_upsert.len(),
            deletes = to_delete.len(),
            "applying sync batch"
        );

        if !to_upsert.is_empty() {
            self.upserter.upsert(&to_upsert)?;
        }
        if !to_delete.is_empty() {
            self.deleter.delete(&to_delete)?;
        }

        info!(
            owner = owner_id,
            upserts = to_upsert.len(),
            deletes = to_delete.len(),
            "sync batch applied"
        );
        Ok(())
    }

    /// Every record stored for `owner_id`, as wire records marked synced.
    pub fn get_data(&self, owner_id: &str) -> Result<Vec<WireRecord>> {
        Ok(self
            .reader
            .read(owner_id)?
            .into_iter()
            .map(|stored| WireRecord {
                data_id: stored.data_id,
                data: stored.data,
                data_type: stored.data_type.as_str().to_string(),
                status: RecordStatus::Synced,
                created_at: stored.created_at,
                modified_at: stored.modified_at,
            })
            .collect())
    }
}

fn into_stored(owner_id: &str, wire: WireRecord) -> Result<StoredRecord> {
    if wire.data_id.is_empty() {
        return Err(LockVaultError::MalformedRemotePayload(
            "record without data_id".to_string(),
        ));
    }
    Ok(StoredRecord {
        data_type: RecordKind::parse(&wire.data_type)?,
        data_id: wire.data_id,
        owner_id: owner_id.to_string(),
        data: wire.data,
        created_at: wire.created_at,
        modified_at: wire.modified_at,
    })
}
