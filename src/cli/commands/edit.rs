//! `lockvault edit`: change fields of an existing record.

use std::fs;

use crate::cli::output;
use crate::cli::{Cli, Context, EditFields};
use crate::errors::{LockVaultError, Result};
use crate::record::SecretData;

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: &str, fields: &EditFields) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (keys, mut vault) = ctx.unlock(cli)?;

    let current = vault
        .get(id)
        .ok_or_else(|| LockVaultError::RecordNotFound(id.to_string()))?
        .data()?;
    let updated = apply(current, fields)?;

    vault.edit(id, &updated)?;
    vault.save(&keys)?;

    output::success(&format!("Updated record {id}"));
    Ok(())
}

/// Overlay the given fields on `data`.  A field that does not belong to
/// the record's kind is an error rather than being ignored.
pub fn apply(mut data: SecretData, fields: &EditFields) -> Result<SecretData> {
    let mut unused: Vec<&str> = Vec::new();

    match &mut data {
        SecretData::LoginPassword(v) => {
            set(&mut v.login, &fields.login);
            set(&mut v.password, &fields.password);
            reject(&mut unused, fields, &["text", "number", "expiry", "cvv", "file"]);
        }
        SecretData::Text(v) => {
            set(&mut v.text, &fields.text);
            reject(&mut unused, fields, &["login", "password", "number", "expiry", "cvv", "file"]);
        }
        SecretData::BankCard(v) => {
            set(&mut v.card_number, &fields.number);
            set(&mut v.expiry_date, &fields.expiry);
            set(&mut v.cvv, &fields.cvv);
            reject(&mut unused, fields, &["login", "password", "text", "file"]);
        }
        SecretData::Binary(v) => {
            if let Some(path) = &fields.file {
                v.data = fs::read(path).map_err(|e| {
                    LockVaultError::CommandFailed(format!("cannot read {}: {e}", path.display()))
                })?;
            }
            reject(&mut unused, fields, &["login", "password", "text", "number", "expiry", "cvv"]);
        }
    }

    if !unused.is_empty() {
        return Err(LockVaultError::CommandFailed(format!(
            "--{} does not apply to a {} record",
            unused.join(", --"),
            data.kind()
        )));
    }

    if let Some(meta) = &fields.meta {
        data.set_meta_info(meta.clone());
    }
    Ok(data)
}

fn set(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

fn reject<'a>(unused: &mut Vec<&'a str>, fields: &EditFields, names: &[&'a str]) {
    for &name in names {
        let given = match name {
            "login" => fields.login.is_some(),
            "password" => fields.password.is_some(),
            "text" => fields.text.is_some(),
            "number" => fields.number.is_some(),
            "expiry" => fields.expiry.is_some(),
            "cvv" => fields.cvv.is_some(),
            "file" => fields.file.is_some(),
            _ => false,
        };
        if given {
            unused.push(name);
        }
    }
}
