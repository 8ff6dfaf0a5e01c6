//! `lockvault sync`: push local changes, pull the server's set.

use std::fs;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockVaultError, Result};
use crate::sync::{ServerClient, SyncEngine};

/// Execute the `sync` command.
pub fn execute(cli: &Cli, token: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let token = match token {
        Some(t) => t.to_string(),
        None => saved_token(&ctx)?,
    };

    let (keys, mut vault) = ctx.unlock(cli)?;

    let client = ServerClient::new(&ctx.settings.server_address, ctx.settings.request_timeout());
    let engine = SyncEngine::new(client, &keys, token);

    let report = match engine.sync(&mut vault) {
        Ok(report) => report,
        Err(LockVaultError::Unauthorized) => {
            output::tip("Your session has expired. Run `lockvault login <username>` again.");
            return Err(LockVaultError::Unauthorized);
        }
        Err(e) => return Err(e),
    };

    output::success(&format!(
        "Synced: {} upserted, {} deleted, {} record(s) now in vault",
        report.upserted, report.deleted, report.pulled
    ));
    Ok(())
}

fn saved_token(ctx: &Context) -> Result<String> {
    match fs::read_to_string(&ctx.session_path) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => {
            output::tip("Run `lockvault login <username>` or pass --token.");
            Err(LockVaultError::Unauthorized)
        }
    }
}
