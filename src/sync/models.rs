//! Wire format shared by the HTTP transport and the in-process remote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::RecordStatus;

/// One record as exchanged with the remote store.
///
/// `data` is base64 of `nonce || ciphertext || tag`; the remote side
/// never sees plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub data_id: String,
    pub data: String,
    pub data_type: String,
    /// Servers may omit the status on pull; everything they return is synced.
    #[serde(default = "synced")]
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

fn synced() -> RecordStatus {
    RecordStatus::Synced
}

/// Credentials body for `/register` and `/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Outcome of one `SyncEngine::sync` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Created/Modified records sent.
    pub upserted: usize,
    /// Deleted records sent.
    pub deleted: usize,
    /// Records in the authoritative set after the pull.
    pub pulled: usize,
}

impl SyncReport {
    pub fn pushed(&self) -> usize {
        self.upserted + self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_defaults_to_synced() {
        let json = r#"{
            "data_id": "a",
            "data": "AAAA",
            "data_type": "TextData",
            "created_at": "2024-05-01T10:00:00Z",
            "modified_at": "2024-05-01T10:00:00Z"
        }"#;
        let record: WireRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, RecordStatus::Synced);
    }

    #[test]
    fn status_serializes_lowercase() {
        let record = WireRecord {
            data_id: "a".into(),
            data: "AAAA".into(),
            data_type: "TextData".into(),
            status: RecordStatus::Deleted,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "deleted");
    }
}
