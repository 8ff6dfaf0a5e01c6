//! Record kind and sync status tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LockVaultError, Result};

/// The closed set of secret kinds a record can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    LoginPassword,
    Text,
    BankCard,
    Binary,
}

impl RecordKind {
    /// Every kind, in display order.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::LoginPassword,
        RecordKind::Text,
        RecordKind::BankCard,
        RecordKind::Binary,
    ];

    /// The tag written to the vault file and the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::LoginPassword => "LoginPasswordData",
            RecordKind::Text => "TextData",
            RecordKind::BankCard => "BankCardData",
            RecordKind::Binary => "BinaryData",
        }
    }

    /// Parse a tag; anything outside the closed set is `UnknownRecordKind`.
    pub fn parse(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| LockVaultError::UnknownRecordKind(tag.to_string()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record stands relative to the last successful sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Created,
    Modified,
    Deleted,
    Synced,
}

impl RecordStatus {
    /// The lowercase name used in the vault file and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Created => "created",
            RecordStatus::Modified => "modified",
            RecordStatus::Deleted => "deleted",
            RecordStatus::Synced => "synced",
        }
    }

    /// `true` for statuses that must be pushed on the next sync.
    pub fn is_pending(self) -> bool {
        !matches!(self, RecordStatus::Synced)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
