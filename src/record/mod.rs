//! Record module: the unit stored in the vault and exchanged on sync.
//!
//! This module provides:
//! - `RecordKind` / `RecordStatus` tags (`kind`)
//! - The four secret shapes and the `SecretData` enum (`secret`)
//! - Canonical payload encoding (`codec`)
//! - `Record`, the plaintext envelope around an encoded payload

pub mod codec;
pub mod kind;
pub mod secret;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

pub use kind::{RecordKind, RecordStatus};
pub use secret::{BankCard, BinaryBlob, LoginPassword, SecretData, TextNote};

use crate::errors::{LockVaultError, Result};

/// A vault record with its payload in canonical plaintext form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Globally unique id, assigned at creation and never changed.
    pub id: String,
    pub kind: RecordKind,
    /// Canonical payload bytes (see `codec`), not yet encrypted.
    pub payload: Vec<u8>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    /// Authority for last-write-wins; never moves backwards for an id.
    pub modified_at: DateTime<Utc>,
}

impl Record {
    /// A brand-new record with a fresh id and `Created` status.
    pub fn new(data: &SecretData) -> Result<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            kind: data.kind(),
            payload: codec::encode(data)?,
            status: RecordStatus::Created,
            created_at: now,
            modified_at: now,
        })
    }

    /// Decode the payload.
    pub fn data(&self) -> Result<SecretData> {
        codec::decode(self.kind, &self.payload)
    }

    /// Replace the payload and mark the record `Modified`.
    ///
    /// The kind is fixed at creation: a payload of another kind is
    /// rejected and the record is left untouched.
    pub fn update(&mut self, data: &SecretData) -> Result<()> {
        if data.kind() != self.kind {
            return Err(LockVaultError::RecordKindMismatch {
                id: self.id.clone(),
                expected: self.kind.to_string(),
                found: data.kind().to_string(),
            });
        }
        self.payload = codec::encode(data)?;
        self.status = RecordStatus::Modified;
        self.touch();
        Ok(())
    }

    /// Mark the record `Deleted`, keeping the payload until sync.
    pub fn mark_deleted(&mut self) {
        self.status = RecordStatus::Deleted;
        self.touch();
    }

    /// Advance `modified_at` to now, or by one nanosecond if the clock
    /// has not moved past the previous value.
    fn touch(&mut self) {
        let now = Utc::now();
        self.modified_at = if now > self.modified_at {
            now
        } else {
            self.modified_at + Duration::nanoseconds(1)
        };
    }
}
