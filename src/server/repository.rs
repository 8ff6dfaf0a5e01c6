//! Storage capabilities for the remote record store.
//!
//! Reading, upserting and deleting are separate traits so a service can
//! be wired from different backends, and tests can swap one out.

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::record::RecordKind;

/// A record as held by the remote store.  `data` stays encrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub data_id: String,
    pub owner_id: String,
    /// Base64 ciphertext exactly as the client sent it.
    pub data: String,
    pub data_type: RecordKind,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Insert-or-update under the last-write-wins rule.
///
/// For every record in the batch: insert if the id is absent, otherwise
/// replace `data` and `modified_at` only when the owner matches and the
/// incoming `modified_at` is strictly greater.  The batch is applied
/// all-or-nothing.
pub trait RecordUpserter: Send + Sync {
    fn upsert(&self, records: &[StoredRecord]) -> Result<()>;
}

/// Every record belonging to one owner.
pub trait RecordReader: Send + Sync {
    fn read(&self, owner_id: &str) -> Result<Vec<StoredRecord>>;
}

/// Conditional delete.
///
/// A record is removed only when the owner matches and the incoming
/// `modified_at` is strictly greater than the stored one.  The batch is
/// applied all-or-nothing.
pub trait RecordDeleter: Send + Sync {
    fn delete(&self, records: &[StoredRecord]) -> Result<()>;
}
