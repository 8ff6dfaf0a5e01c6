//! On-disk vault file format.
//!
//! A vault file is a pretty-printed JSON array, one entry per record:
//!
//! ```text
//! [
//!   {
//!     "data_id": "…",
//!     "data_type": "LoginPasswordData",
//!     "data": "<base64(nonce || ciphertext || tag)>",
//!     "status": "synced",
//!     "created_at": "2024-05-01T10:00:00.123456789Z",
//!     "modified_at": "2024-05-01T10:00:00.123456789Z"
//!   }
//! ]
//! ```
//!
//! Each payload is encrypted on its own so a single damaged entry can
//! be identified by id.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::KeyManager;
use crate::errors::{LockVaultError, Result};
use crate::fsutil;
use crate::record::{Record, RecordKind, RecordStatus};

/// One record as stored in the vault file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    pub data_id: String,
    pub data_type: String,
    /// Base64 of the encrypted canonical payload.
    pub data: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Encrypt a canonical payload and return it as base64 text.
pub fn seal_payload(keys: &KeyManager, payload: &[u8]) -> Result<String> {
    Ok(BASE64.encode(keys.encrypt(payload)?))
}

/// Why a sealed payload could not be opened.
#[derive(Debug)]
pub enum OpenPayloadError {
    /// The text is not valid base64.
    Encoding(base64::DecodeError),
    /// Decryption or authentication failed.
    Crypto(LockVaultError),
}

/// Reverse of `seal_payload`.
pub fn open_payload(
    keys: &KeyManager,
    sealed: &str,
) -> std::result::Result<Vec<u8>, OpenPayloadError> {
    let ciphertext = BASE64
        .decode(sealed.as_bytes())
        .map_err(OpenPayloadError::Encoding)?;
    keys.decrypt(&ciphertext).map_err(OpenPayloadError::Crypto)
}

/// Encrypt every record and write the vault file atomically (mode 0600).
///
/// Entries are written sorted by id so the output is deterministic.
pub fn write_vault(path: &Path, records: &[Record], keys: &KeyManager) -> Result<()> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let entries = sorted
        .into_iter()
        .map(|record| {
            Ok(VaultEntry {
                data_id: record.id.clone(),
                data_type: record.kind.as_str().to_string(),
                data: seal_payload(keys, &record.payload)?,
                status: record.status,
                created_at: record.created_at,
                modified_at: record.modified_at,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let bytes = serde_json::to_vec_pretty(&entries)
        .map_err(|e| LockVaultError::Serialization(format!("vault entries: {e}")))?;

    fsutil::ensure_parent_dir(path)?;
    fsutil::write_private_atomic(path, &bytes)?;

    debug!(path = %path.display(), records = entries.len(), "vault written");
    Ok(())
}

/// Read and decrypt a vault file, indexing records by id.
///
/// Any failure aborts the whole read; a partially decrypted vault is
/// never returned.  Duplicate ids resolve to the last entry.
pub fn read_vault(path: &Path, keys: &KeyManager) -> Result<BTreeMap<String, Record>> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LockVaultError::VaultNotFound(path.to_path_buf()),
        _ => LockVaultError::Io(e),
    })?;

    let entries: Vec<VaultEntry> = serde_json::from_slice(&bytes)
        .map_err(|e| LockVaultError::VaultCorrupt(format!("{}: {e}", path.display())))?;

    let mut records = BTreeMap::new();
    for entry in entries {
        let kind = RecordKind::parse(&entry.data_type)?;
        let payload = open_payload(keys, &entry.data).map_err(|e| match e {
            OpenPayloadError::Encoding(err) => LockVaultError::VaultCorrupt(format!(
                "record '{}' is not valid base64: {err}",
                entry.data_id
            )),
            OpenPayloadError::Crypto(LockVaultError::KeyNotLoaded) => LockVaultError::KeyNotLoaded,
            OpenPayloadError::Crypto(_) => LockVaultError::RecordDecryptFailed {
                id: entry.data_id.clone(),
            },
        })?;

        records.insert(
            entry.data_id.clone(),
            Record {
                id: entry.data_id,
                kind,
                payload,
                status: entry.status,
                created_at: entry.created_at,
                modified_at: entry.modified_at,
            },
        );
    }

    debug!(path = %path.display(), records = records.len(), "vault read");
    Ok(records)
}
