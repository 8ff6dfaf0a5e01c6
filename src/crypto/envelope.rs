//! Key envelope: the content key wrapped under a password-derived key.
//!
//! File layout:
//!
//! ```text
//! [salt: 16 bytes][nonce: 12 bytes][wrapped content key + 16-byte tag]
//! ```
//!
//! Changing the password only rewrites this small file; record
//! ciphertexts stay untouched.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::encryption::{self, NONCE_LEN};
use super::kdf::{derive_wrapping_key, generate_salt, Argon2Params, SALT_LEN};
use super::keys::ContentKey;
use crate::errors::{LockVaultError, Result};
use crate::fsutil;

/// Smallest byte count a readable envelope can have (salt + nonce).
pub const MIN_ENVELOPE_LEN: usize = SALT_LEN + NONCE_LEN;

/// Wrap `key` under a fresh salt and the given password.
pub fn seal(key: &ContentKey, password: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let salt = generate_salt()?;
    let wrapping_key = derive_wrapping_key(password, &salt, params)?;
    let wrapped = encryption::encrypt(&wrapping_key[..], key.as_bytes())?;

    let mut envelope = Vec::with_capacity(SALT_LEN + wrapped.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&wrapped);
    Ok(envelope)
}

/// Unwrap the content key from envelope bytes.
///
/// A wrong password and a tampered envelope both surface as
/// `WrongPasswordOrCorruptFile`; callers cannot tell which happened.
pub fn open(envelope: &[u8], password: &[u8], params: &Argon2Params) -> Result<ContentKey> {
    if envelope.len() < MIN_ENVELOPE_LEN {
        return Err(LockVaultError::KeyIo(format!(
            "key file is truncated ({} bytes, need at least {MIN_ENVELOPE_LEN})",
            envelope.len()
        )));
    }

    let (salt, wrapped) = envelope.split_at(SALT_LEN);
    let wrapping_key = derive_wrapping_key(password, salt, params)?;

    let unwrapped = zeroize::Zeroizing::new(
        encryption::decrypt(&wrapping_key[..], wrapped)
            .map_err(|_| LockVaultError::WrongPasswordOrCorruptFile)?,
    );

    ContentKey::from_slice(&unwrapped).ok_or(LockVaultError::WrongPasswordOrCorruptFile)
}

/// Read raw envelope bytes from disk.
pub fn read_envelope(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            LockVaultError::KeyIo(format!("key file not found at {}", path.display()))
        }
        _ => LockVaultError::KeyIo(format!("failed to read {}: {e}", path.display())),
    })
}

/// Write envelope bytes to disk atomically with owner-only permissions.
pub fn write_envelope(path: &Path, envelope: &[u8]) -> Result<()> {
    fsutil::ensure_parent_dir(path)
        .map_err(|e| LockVaultError::KeyIo(format!("cannot create key directory: {e}")))?;
    fsutil::write_private_atomic(path, envelope)
        .map_err(|e| LockVaultError::KeyIo(format!("failed to write {}: {e}", path.display())))
}
