//! `KeyManager`: owner of the in-memory content key.
//!
//! There is no process-wide key: every consumer (vault, sync engine,
//! CLI command) receives the manager by reference.

use std::path::Path;

use tracing::{debug, info};

use super::encryption;
use super::envelope;
use super::kdf::Argon2Params;
use super::keys::ContentKey;
use crate::errors::{LockVaultError, Result};

/// Holds the vault's content key for the process lifetime.
#[derive(Debug, Default)]
pub struct KeyManager {
    key: Option<ContentKey>,
    params: Argon2Params,
}

impl KeyManager {
    /// An empty manager using the default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty manager using explicit Argon2id parameters.
    pub fn with_params(params: Argon2Params) -> Self {
        Self { key: None, params }
    }

    /// A manager that already holds `key` (no envelope involved).
    pub fn from_key(key: ContentKey) -> Self {
        Self {
            key: Some(key),
            params: Argon2Params::default(),
        }
    }

    /// Generate a fresh content key, wrap it under `password` and write
    /// the envelope to `path`.  The new key is loaded into this manager.
    ///
    /// Refuses to overwrite an existing key file.
    pub fn generate_key(&mut self, path: &Path, password: &[u8]) -> Result<()> {
        if path.exists() {
            return Err(LockVaultError::KeyIo(format!(
                "key file already exists at {}",
                path.display()
            )));
        }

        let key = ContentKey::generate()?;
        let sealed = envelope::seal(&key, password, &self.params)?;
        envelope::write_envelope(path, &sealed)?;

        info!(path = %path.display(), "generated new content key");
        self.key = Some(key);
        Ok(())
    }

    /// Read the envelope at `path` and unwrap the content key with `password`.
    pub fn import_key(&mut self, path: &Path, password: &[u8]) -> Result<()> {
        let sealed = envelope::read_envelope(path)?;
        let key = envelope::open(&sealed, password, &self.params)?;

        debug!(path = %path.display(), "content key unlocked");
        self.key = Some(key);
        Ok(())
    }

    /// Re-wrap the loaded key under `new_password` and replace the envelope.
    ///
    /// Record ciphertexts are unaffected because the content key itself
    /// does not change.
    pub fn rewrap_key(&self, path: &Path, new_password: &[u8]) -> Result<()> {
        let key = self.key()?;
        let sealed = envelope::seal(key, new_password, &self.params)?;
        envelope::write_envelope(path, &sealed)?;

        info!(path = %path.display(), "content key re-wrapped under new password");
        Ok(())
    }

    /// Encrypt `plaintext` under the content key with a fresh nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        encryption::encrypt(self.key()?.as_bytes(), plaintext)
    }

    /// Decrypt `nonce || ciphertext || tag` produced by `encrypt`.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        encryption::decrypt(self.key()?.as_bytes(), ciphertext)
    }

    /// Returns `true` once a key has been generated or imported.
    pub fn is_loaded(&self) -> bool {
        self.key.is_some()
    }

    fn key(&self) -> Result<&ContentKey> {
        self.key.as_ref().ok_or(LockVaultError::KeyNotLoaded)
    }
}
