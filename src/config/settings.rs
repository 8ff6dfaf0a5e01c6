use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::crypto::Argon2Params;
use crate::errors::{LockVaultError, Result};

/// Client configuration, loaded from `.lockvault.toml`.
///
/// Every field has a default so LockVault works without any config
/// file at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the project root) holding the vault and key.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// File name of the encrypted record store inside `data_dir`.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// File name of the wrapped content key inside `data_dir`.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Base URL of the sync server.
    #[serde(default = "default_server_address")]
    pub server_address: String,

    /// Global timeout for one HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Argon2 memory cost in KiB (default: 64 MiB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 1).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".lockvault".to_string()
}

fn default_vault_file() -> String {
    "vault.json".to_string()
}

fn default_key_file() -> String {
    "vault.key".to_string()
}

fn default_server_address() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    1
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            vault_file: default_vault_file(),
            key_file: default_key_file(),
            server_address: default_server_address(),
            request_timeout_secs: default_request_timeout_secs(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".lockvault.toml";

    /// Load settings from `<project_dir>/.lockvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LockVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Example: `project_dir/.lockvault/vault.json`
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join(&self.vault_file)
    }

    /// Example: `project_dir/.lockvault/vault.key`
    pub fn key_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join(&self.key_file)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
