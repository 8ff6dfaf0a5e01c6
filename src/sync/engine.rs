//! Sync engine: push local changes, pull the authoritative set, rewrite
//! the local vault.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::crypto::KeyManager;
use crate::errors::{LockVaultError, Result};
use crate::record::{Record, RecordKind, RecordStatus};
use crate::vault::format::{open_payload, seal_payload, OpenPayloadError};
use crate::vault::LocalVault;

use super::models::{SyncReport, WireRecord};
use super::remote::SyncRemote;

/// Reconciles a `LocalVault` with a remote store for one session.
pub struct SyncEngine<'k, R: SyncRemote> {
    remote: R,
    keys: &'k KeyManager,
    token: String,
}

impl<'k, R: SyncRemote> SyncEngine<'k, R> {
    pub fn new(remote: R, keys: &'k KeyManager, token: impl Into<String>) -> Self {
        Self {
            remote,
            keys,
            token: token.into(),
        }
    }

    /// Run one full sync cycle.
    ///
    /// The vault on disk and in memory is only replaced once every
    /// pulled record has decrypted; any earlier failure leaves both as
    /// they were.
    pub fn sync(&self, vault: &mut LocalVault) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        let (to_upsert, to_delete): (Vec<&Record>, Vec<&Record>) = vault
            .records()
            .filter(|r| r.status.is_pending())
            .partition(|r| r.status != RecordStatus::Deleted);
        report.upserted = to_upsert.len();
        report.deleted = to_delete.len();

        if report.pushed() > 0 {
            let batch = to_upsert
                .into_iter()
                .chain(to_delete)
                .map(|record| self.to_wire(record))
                .collect::<Result<Vec<_>>>()?;
            debug!(records = batch.len(), "pushing local changes");
            self.remote.push_changes(&self.token, &batch)?;
        }

        let pulled = self.remote.fetch_all(&self.token)?;
        debug!(records = pulled.len(), "pulled remote set");

        let mut fresh = BTreeMap::new();
        for wire in pulled {
            let record = self.from_wire(wire)?;
            fresh.insert(record.id.clone(), record);
        }
        report.pulled = fresh.len();

        let records: Vec<Record> = fresh.values().cloned().collect();
        LocalVault::save_records(&records, vault.path(), self.keys)?;
        vault.replace_all(fresh);

        info!(
            upserted = report.upserted,
            deleted = report.deleted,
            pulled = report.pulled,
            "sync complete"
        );
        Ok(report)
    }

    fn to_wire(&self, record: &Record) -> Result<WireRecord> {
        Ok(WireRecord {
            data_id: record.id.clone(),
            data: seal_payload(self.keys, &record.payload)?,
            data_type: record.kind.as_str().to_string(),
            status: record.status,
            created_at: record.created_at,
            modified_at: record.modified_at,
        })
    }

    fn from_wire(&self, wire: WireRecord) -> Result<Record> {
        if wire.data.is_empty() {
            return Err(LockVaultError::MalformedRemotePayload(format!(
                "record '{}' has no data",
                wire.data_id
            )));
        }
        let kind = RecordKind::parse(&wire.data_type)?;
        let payload = open_payload(self.keys, &wire.data).map_err(|e| match e {
            OpenPayloadError::Encoding(err) => LockVaultError::MalformedRemotePayload(format!(
                "record '{}' is not valid base64: {err}",
                wire.data_id
            )),
            OpenPayloadError::Crypto(LockVaultError::KeyNotLoaded) => LockVaultError::KeyNotLoaded,
            OpenPayloadError::Crypto(_) => LockVaultError::RemoteRecordDecryptFailed {
                id: wire.data_id.clone(),
            },
        })?;

        Ok(Record {
            id: wire.data_id,
            kind,
            payload,
            status: RecordStatus::Synced,
            created_at: wire.created_at,
            modified_at: wire.modified_at,
        })
    }
}
