//! Cryptographic primitives for LockVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - The zeroizing content key (`keys`) and its password envelope (`envelope`)
//! - `KeyManager`, the single owner of the unlocked key (`manager`)

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod keys;
pub mod manager;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_wrapping_key, generate_salt, Argon2Params};
pub use keys::ContentKey;
pub use manager::KeyManager;
