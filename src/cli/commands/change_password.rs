//! `lockvault change-password`: re-wrap the content key.
//!
//! Only the key envelope is rewritten; records stay encrypted under the
//! same content key.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, Context};
use crate::errors::Result;

/// Execute the `change-password` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    output::info("Enter your current key password.");
    let keys = ctx.unlock_key(cli)?;

    output::info("Choose your new key password.");
    let new_password = prompt_new_password(cli, false)?;
    keys.rewrap_key(&ctx.key_path, new_password.as_bytes())?;

    output::success("Key password changed");
    Ok(())
}
