//! `lockvault generate-key`: create the content key and its envelope.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context};
use crate::crypto::KeyManager;
use crate::errors::Result;

/// Execute the `generate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    if ctx.key_path.exists() {
        output::tip("Use `lockvault change-password` to re-wrap the existing key.");
    }

    let password = prompt_new_password(cli, true)?;
    let mut keys = KeyManager::with_params(ctx.settings.argon2_params());
    keys.generate_key(&ctx.key_path, password.as_bytes())?;

    output::success(&format!("Content key written to {}", ctx.key_path.display()));
    output::tip("Keep this file and its password safe; losing either makes the vault unreadable.");
    output::tip("Run `lockvault add <kind>` to add your first record.");

    Ok(())
}
