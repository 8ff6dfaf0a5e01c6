//! `lockvault register`: create an account on the sync server.

use crate::cli::output;
use crate::cli::{secret_or_prompt, Cli, Context};
use crate::errors::Result;
use crate::sync::ServerClient;

/// Execute the `register` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let password = secret_or_prompt(None, "Account password")?;

    let client = ServerClient::new(&ctx.settings.server_address, ctx.settings.request_timeout());
    client.register(username, &password)?;

    output::success(&format!(
        "Registered '{username}' at {}",
        ctx.settings.server_address
    ));
    output::tip("Run `lockvault login <username>` to start a session.");
    Ok(())
}
