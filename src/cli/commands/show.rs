//! `lockvault show`: print one record's contents.

use std::path::Path;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{LockVaultError, Result};
use crate::fsutil;
use crate::record::SecretData;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, reveal: bool, out: Option<&Path>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (_keys, vault) = ctx.unlock(cli)?;

    let record = vault
        .get(id)
        .ok_or_else(|| LockVaultError::RecordNotFound(id.to_string()))?;
    let data = record.data()?;

    output::print_record_fields(record, &data, reveal);

    match (&data, out) {
        (SecretData::Binary(blob), Some(path)) => {
            fsutil::write_private_atomic(path, &blob.data)?;
            output::success(&format!(
                "Wrote {} bytes to {}",
                blob.data.len(),
                path.display()
            ));
        }
        (_, Some(_)) => {
            output::warning("--output only applies to binary records; nothing written.");
        }
        (_, None) => {}
    }

    Ok(())
}
