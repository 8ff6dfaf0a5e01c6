//! The vault's content key.

use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{LockVaultError, Result};

/// Length of the content key in bytes (256 bits).
pub const CONTENT_KEY_LEN: usize = 32;

/// A 32-byte content key that zeroes its memory when dropped.
///
/// Every record payload is encrypted under this key.  It only ever
/// leaves memory wrapped inside a key envelope.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ContentKey {
    bytes: [u8; CONTENT_KEY_LEN],
}

impl ContentKey {
    /// Create a `ContentKey` from raw bytes.
    pub fn new(bytes: [u8; CONTENT_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh key from the OS CSPRNG.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; CONTENT_KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| LockVaultError::EncryptionFailed(format!("OS RNG unavailable: {e}")))?;
        let key = Self::new(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Build a key from an unwrapped slice; anything but 32 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; CONTENT_KEY_LEN] = bytes.try_into().ok()?;
        Some(Self::new(array))
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; CONTENT_KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ContentKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_differ() {
        let a = ContentKey::generate().unwrap();
        let b = ContentKey::generate().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn from_slice_requires_exact_length() {
        assert!(ContentKey::from_slice(&[0u8; 31]).is_none());
        assert!(ContentKey::from_slice(&[0u8; 33]).is_none());
        assert!(ContentKey::from_slice(&[7u8; 32]).is_some());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = ContentKey::new([0xAB; 32]);
        assert_eq!(format!("{key:?}"), "ContentKey(<redacted>)");
    }
}
