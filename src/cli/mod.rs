//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::KeyManager;
use crate::errors::{LockVaultError, Result};
use crate::vault::LocalVault;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// LockVault CLI: personal secret vault with encrypted sync.
#[derive(Parser)]
#[command(
    name = "lockvault",
    about = "Personal secret vault with client-side encryption and sync",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the vault and key (default from .lockvault.toml)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Sync server base URL
    #[arg(long, env = "LOCKVAULT_SERVER", global = true)]
    pub server: Option<String>,

    /// Key password (prompted when absent)
    #[arg(long, env = "LOCKVAULT_KEY_PASSWORD", hide_env_values = true, global = true, hide = true)]
    pub key_password: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new content key, wrapped under a password
    GenerateKey,

    /// Re-wrap the content key under a new password
    ChangePassword,

    /// Add a new record
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// Change fields of an existing record
    Edit {
        /// Record id
        id: String,
        #[command(flatten)]
        fields: EditFields,
    },

    /// Mark a record as deleted (removed on next sync)
    Delete {
        /// Record id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all records
    List,

    /// Show one record's contents
    Show {
        /// Record id
        id: String,
        /// Print passwords, card numbers and CVVs in clear
        #[arg(long)]
        reveal: bool,
        /// Write binary data to this file instead of printing its size
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create an account on the sync server
    Register {
        /// Account name
        username: String,
    },

    /// Log in to the sync server and store the session token
    Login {
        /// Account name
        username: String,
    },

    /// Push local changes and pull the server's records
    Sync {
        /// Session token (defaults to the one saved by `login`)
        #[arg(long, env = "LOCKVAULT_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

/// The kind of record to add.
#[derive(clap::Subcommand)]
pub enum AddKind {
    /// A login/password pair
    Login {
        #[arg(long)]
        login: Option<String>,
        /// Prompted (hidden) when absent
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "")]
        meta: String,
    },

    /// A free-form text note
    Text {
        #[arg(long)]
        text: Option<String>,
        #[arg(long, default_value = "")]
        meta: String,
    },

    /// A bank card
    Card {
        #[arg(long)]
        number: Option<String>,
        /// Expiry date, e.g. 12/27
        #[arg(long)]
        expiry: Option<String>,
        /// Prompted (hidden) when absent
        #[arg(long)]
        cvv: Option<String>,
        #[arg(long, default_value = "")]
        meta: String,
    },

    /// The contents of a file
    Binary {
        /// File to read
        file: PathBuf,
        #[arg(long, default_value = "")]
        meta: String,
    },
}

/// Field overrides for `edit`; unset fields keep their current value.
#[derive(clap::Args, Default)]
pub struct EditFields {
    #[arg(long)]
    pub login: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub expiry: Option<String>,
    #[arg(long)]
    pub cvv: Option<String>,
    /// Replace binary data with this file's contents
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub meta: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved locations and settings for one invocation.
pub struct Context {
    pub settings: Settings,
    pub vault_path: PathBuf,
    pub key_path: PathBuf,
    pub session_path: PathBuf,
}

impl Context {
    /// Load `.lockvault.toml` from the working directory and apply CLI
    /// overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::for_project(cli, &cwd)
    }

    pub fn for_project(cli: &Cli, project_dir: &Path) -> Result<Self> {
        let mut settings = Settings::load(project_dir)?;
        if let Some(dir) = &cli.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(server) = &cli.server {
            settings.server_address = server.clone();
        }

        let vault_path = settings.vault_path(project_dir);
        let key_path = settings.key_path(project_dir);
        let session_path = project_dir.join(&settings.data_dir).join(SESSION_FILE);
        Ok(Self {
            settings,
            vault_path,
            key_path,
            session_path,
        })
    }

    /// Unlock the content key and open the vault.
    pub fn unlock(&self, cli: &Cli) -> Result<(KeyManager, LocalVault)> {
        let keys = self.unlock_key(cli)?;
        let vault = LocalVault::open(&self.vault_path, &keys)?;
        Ok((keys, vault))
    }

    /// Unlock the content key only.
    pub fn unlock_key(&self, cli: &Cli) -> Result<KeyManager> {
        if !self.key_path.exists() {
            output::tip("Run `lockvault generate-key` first.");
            return Err(LockVaultError::KeyIo(format!(
                "no key file at {}",
                self.key_path.display()
            )));
        }
        let password = prompt_password(cli)?;
        let mut keys = KeyManager::with_params(self.settings.argon2_params());
        keys.import_key(&self.key_path, password.as_bytes())?;
        Ok(keys)
    }
}

/// File (inside the data directory) holding the last session token.
pub const SESSION_FILE: &str = "session";

/// Get the key password, trying in order:
/// 1. `--key-password` / `LOCKVAULT_KEY_PASSWORD` (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(cli: &Cli) -> Result<Zeroizing<String>> {
    if let Some(pw) = cli.key_password.as_deref().filter(|pw| !pw.is_empty()) {
        return Ok(Zeroizing::new(pw.to_string()));
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter key password")
        .interact()
        .map_err(|e| LockVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `generate-key`
/// and `change-password`).
///
/// Also respects `LOCKVAULT_KEY_PASSWORD` for scripted usage when
/// `allow_env` is set.  Enforces a minimum password length.
pub fn prompt_new_password(cli: &Cli, allow_env: bool) -> Result<Zeroizing<String>> {
    if allow_env {
        if let Some(pw) = cli.key_password.as_deref().filter(|pw| !pw.is_empty()) {
            check_password_len(pw)?;
            return Ok(Zeroizing::new(pw.to_string()));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose key password")
            .with_confirmation("Confirm key password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| LockVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Prompt for a visible value unless one was passed on the command line.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| LockVaultError::CommandFailed(format!("{prompt} prompt: {e}"))),
    }
}

/// Prompt for a hidden value unless one was passed on the command line.
pub fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<Zeroizing<String>> {
    match value {
        Some(v) => Ok(Zeroizing::new(v)),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| LockVaultError::CommandFailed(format!("{prompt} prompt: {e}"))),
    }
}

fn check_password_len(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(LockVaultError::CommandFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lockvault").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_overrides_settings() {
        let tmp = TempDir::new().unwrap();
        let cli = parse(&["list", "--data-dir", "store", "--server", "http://h:1"]);
        let ctx = Context::for_project(&cli, tmp.path()).unwrap();

        assert_eq!(ctx.settings.server_address, "http://h:1");
        assert_eq!(ctx.vault_path, tmp.path().join("store").join("vault.json"));
        assert_eq!(ctx.key_path, tmp.path().join("store").join("vault.key"));
        assert_eq!(ctx.session_path, tmp.path().join("store").join(SESSION_FILE));
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv", "list"]).verbose, 2);
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(check_password_len("short").is_err());
        assert!(check_password_len("long enough").is_ok());
    }

    #[test]
    fn value_passed_on_command_line_skips_prompt() {
        assert_eq!(value_or_prompt(Some("x".into()), "Login").unwrap(), "x");
        assert_eq!(
            secret_or_prompt(Some("y".into()), "Password").unwrap().as_str(),
            "y"
        );
    }
}
