//! `lockvault list`: display all records in a table.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (_keys, vault) = ctx.unlock(cli)?;

    output::info(&format!(
        "{} record(s), {} pending sync",
        vault.len(),
        vault.pending_count()
    ));
    output::print_records_table(vault.records());

    Ok(())
}
