//! `lockvault delete`: mark a record as deleted.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete record '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| LockVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let ctx = Context::load(cli)?;
    let (keys, mut vault) = ctx.unlock(cli)?;

    vault.mark_deleted(id)?;
    vault.save(&keys)?;

    output::success(&format!("Marked record '{id}' as deleted"));
    output::tip("Run `lockvault sync` to remove it from the server.");

    Ok(())
}
