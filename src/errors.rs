use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in LockVault.
#[derive(Debug, Error)]
pub enum LockVaultError {
    // --- Key errors ---
    #[error("Wrong password or corrupted key file")]
    WrongPasswordOrCorruptFile,

    #[error("Key file error: {0}")]
    KeyIo(String),

    #[error("No encryption key loaded — generate or import a key first")]
    KeyNotLoaded,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — input is too short to hold a nonce")]
    DecryptionFailed,

    #[error("Authentication failed — wrong key or tampered data")]
    AuthenticationFailed,

    // --- Codec errors ---
    #[error("Unknown record kind '{0}'")]
    UnknownRecordKind(String),

    #[error("Malformed record payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid text encoding: {0}")]
    InvalidTextEncoding(String),

    // --- Vault errors ---
    #[error("Vault file not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault file is corrupt: {0}")]
    VaultCorrupt(String),

    #[error("Record '{id}' failed authentication — vault not loaded")]
    RecordDecryptFailed { id: String },

    #[error("Record '{0}' not found")]
    RecordNotFound(String),

    #[error("Record '{0}' is marked as deleted")]
    RecordDeleted(String),

    #[error("Record '{id}' holds {expected} and cannot be changed to {found}")]
    RecordKindMismatch {
        id: String,
        expected: String,
        found: String,
    },

    // --- Sync errors ---
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server returned unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("Malformed server response: {0}")]
    MalformedRemotePayload(String),

    #[error("Record '{id}' from server failed authentication — sync aborted")]
    RemoteRecordDecryptFailed { id: String },

    #[error("Not authorized — log in again")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for LockVault results.
pub type Result<T> = std::result::Result<T, LockVaultError>;
