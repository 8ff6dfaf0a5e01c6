//! `lockvault login`: obtain a session token and save it for `sync`.

use crate::cli::output;
use crate::cli::{secret_or_prompt, Cli, Context};
use crate::errors::Result;
use crate::fsutil;
use crate::sync::ServerClient;

/// Execute the `login` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let password = secret_or_prompt(None, "Account password")?;

    let client = ServerClient::new(&ctx.settings.server_address, ctx.settings.request_timeout());
    let token = client.login(username, &password)?;

    fsutil::ensure_parent_dir(&ctx.session_path)?;
    fsutil::write_private_atomic(&ctx.session_path, token.as_bytes())?;

    output::success(&format!("Logged in as '{username}'"));
    output::tip("Run `lockvault sync` to synchronize your records.");
    Ok(())
}
