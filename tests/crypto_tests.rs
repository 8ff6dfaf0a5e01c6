//! Integration tests for the LockVault crypto module.

use std::collections::HashSet;
use std::fs;

use lockvault::crypto::encryption::NONCE_LEN;
use lockvault::crypto::kdf::SALT_LEN;
use lockvault::crypto::{decrypt, encrypt, Argon2Params, ContentKey, KeyManager};
use lockvault::errors::LockVaultError;
use tempfile::TempDir;

/// Helper: a key path inside a fresh temp dir.
fn key_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("vault.key");
    (dir, path)
}

// ---------------------------------------------------------------------------
// Key envelope
// ---------------------------------------------------------------------------

#[test]
fn generated_key_can_be_imported_with_same_password() {
    let (_dir, path) = key_path();

    let mut original = KeyManager::new();
    original.generate_key(&path, b"correct horse").unwrap();
    let ciphertext = original.encrypt(b"payload").unwrap();

    let mut reopened = KeyManager::new();
    reopened.import_key(&path, b"correct horse").unwrap();
    assert_eq!(reopened.decrypt(&ciphertext).unwrap(), b"payload");
}

#[test]
fn envelope_layout_is_salt_nonce_ciphertext_tag() {
    let (_dir, path) = key_path();
    KeyManager::new().generate_key(&path, b"pw-12345").unwrap();

    // 16 salt + 12 nonce + 32 key + 16 tag
    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), SALT_LEN + NONCE_LEN + 32 + 16);
}

#[cfg(unix)]
#[test]
fn key_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = key_path();
    KeyManager::new().generate_key(&path, b"pw-12345").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn wrong_password_is_rejected() {
    let (_dir, path) = key_path();
    KeyManager::new().generate_key(&path, b"right").unwrap();

    let result = KeyManager::new().import_key(&path, b"wrong");
    assert!(matches!(
        result,
        Err(LockVaultError::WrongPasswordOrCorruptFile)
    ));
}

#[test]
fn tampered_envelope_is_indistinguishable_from_wrong_password() {
    let (_dir, path) = key_path();
    KeyManager::new().generate_key(&path, b"pw").unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(&path, &bytes).unwrap();

    let result = KeyManager::new().import_key(&path, b"pw");
    assert!(matches!(
        result,
        Err(LockVaultError::WrongPasswordOrCorruptFile)
    ));
}

#[test]
fn truncated_envelope_is_key_io_error() {
    let (_dir, path) = key_path();
    fs::write(&path, [0u8; SALT_LEN + NONCE_LEN - 1]).unwrap();

    let result = KeyManager::new().import_key(&path, b"pw");
    assert!(matches!(result, Err(LockVaultError::KeyIo(_))));
}

#[test]
fn missing_envelope_is_key_io_error() {
    let (_dir, path) = key_path();
    let result = KeyManager::new().import_key(&path, b"pw");
    assert!(matches!(result, Err(LockVaultError::KeyIo(_))));
}

#[test]
fn generate_refuses_to_overwrite() {
    let (_dir, path) = key_path();
    KeyManager::new().generate_key(&path, b"pw").unwrap();

    let result = KeyManager::new().generate_key(&path, b"pw");
    assert!(matches!(result, Err(LockVaultError::KeyIo(_))));
}

#[test]
fn rewrap_keeps_content_key() {
    let (_dir, path) = key_path();
    let mut keys = KeyManager::new();
    keys.generate_key(&path, b"old-password").unwrap();
    let ciphertext = keys.encrypt(b"still readable").unwrap();

    keys.rewrap_key(&path, b"new-password").unwrap();

    assert!(KeyManager::new().import_key(&path, b"old-password").is_err());
    let mut reopened = KeyManager::new();
    reopened.import_key(&path, b"new-password").unwrap();
    assert_eq!(reopened.decrypt(&ciphertext).unwrap(), b"still readable");
}

#[test]
fn weak_argon2_params_are_rejected() {
    let (_dir, path) = key_path();
    let weak = Argon2Params {
        memory_kib: 1024,
        ..Argon2Params::default()
    };
    let result = KeyManager::with_params(weak).generate_key(&path, b"pw");
    assert!(matches!(result, Err(LockVaultError::KeyDerivationFailed(_))));
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// Payload encryption
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"{\"Text\":\"hello\",\"MetaInfo\":\"\"}";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");
    assert_eq!(ciphertext.len(), NONCE_LEN + plaintext.len() + 16);

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn thousand_encryptions_never_repeat_a_nonce() {
    let keys = KeyManager::from_key(ContentKey::new([7u8; 32]));
    let mut nonces = HashSet::new();

    for _ in 0..1000 {
        let ciphertext = keys.encrypt(b"same plaintext").unwrap();
        assert!(nonces.insert(ciphertext[..NONCE_LEN].to_vec()));
    }
}

#[test]
fn short_ciphertext_is_decryption_failed() {
    let keys = KeyManager::from_key(ContentKey::new([7u8; 32]));
    assert!(matches!(
        keys.decrypt(&[0u8; NONCE_LEN - 1]),
        Err(LockVaultError::DecryptionFailed)
    ));
}

#[test]
fn foreign_key_is_authentication_failed() {
    let a = KeyManager::from_key(ContentKey::new([1u8; 32]));
    let b = KeyManager::from_key(ContentKey::new([2u8; 32]));
    let ciphertext = a.encrypt(b"secret").unwrap();

    assert!(matches!(
        b.decrypt(&ciphertext),
        Err(LockVaultError::AuthenticationFailed)
    ));
}

#[test]
fn unloaded_manager_refuses_to_work() {
    let keys = KeyManager::new();
    assert!(!keys.is_loaded());
    assert!(matches!(keys.encrypt(b"x"), Err(LockVaultError::KeyNotLoaded)));
    assert!(matches!(keys.decrypt(b"x"), Err(LockVaultError::KeyNotLoaded)));
}
