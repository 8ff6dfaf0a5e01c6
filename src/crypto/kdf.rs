//! Password-based key derivation using Argon2id.
//!
//! The derived key never encrypts records directly: it only wraps the
//! vault's content key (see `envelope`).  Parameters come from `Settings`
//! but may never drop below the floor enforced here.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroizing;

use crate::errors::{LockVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum memory cost in KiB (64 MiB).
const MIN_MEMORY_KIB: u32 = 65_536;

/// Minimum number of parallel lanes.
const MIN_PARALLELISM: u32 = 4;

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MiB).
    pub memory_kib: u32,
    /// Number of iterations (default: 1).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: MIN_PARALLELISM,
        }
    }
}

/// Derive a 32-byte wrapping key from a password and salt.
///
/// The same password + salt + params always produce the same key.
pub fn derive_wrapping_key(
    password: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(LockVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(LockVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < MIN_PARALLELISM {
        return Err(LockVaultError::KeyDerivationFailed(format!(
            "Argon2 parallelism must be at least {MIN_PARALLELISM} (got {})",
            argon2_params.parallelism
        )));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| LockVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password, salt, &mut key[..])
        .map_err(|e| LockVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a random 16-byte salt from the OS CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| LockVaultError::KeyDerivationFailed(format!("OS RNG unavailable: {e}")))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_weak_memory_cost() {
        let weak = Argon2Params {
            memory_kib: 8_192,
            ..Argon2Params::default()
        };
        let result = derive_wrapping_key(b"pw", &[0u8; SALT_LEN], &weak);
        assert!(matches!(result, Err(LockVaultError::KeyDerivationFailed(_))));
    }

    #[test]
    fn rejects_low_parallelism() {
        let weak = Argon2Params {
            parallelism: 1,
            ..Argon2Params::default()
        };
        assert!(derive_wrapping_key(b"pw", &[0u8; SALT_LEN], &weak).is_err());
    }

    #[test]
    fn rejects_zero_iterations() {
        let weak = Argon2Params {
            iterations: 0,
            ..Argon2Params::default()
        };
        assert!(derive_wrapping_key(b"pw", &[0u8; SALT_LEN], &weak).is_err());
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(generate_salt().unwrap(), generate_salt().unwrap());
    }
}
