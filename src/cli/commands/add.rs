//! `lockvault add`: create a new record.

use std::fs;

use crate::cli::output;
use crate::cli::{secret_or_prompt, value_or_prompt, AddKind, Cli, Context};
use crate::errors::{LockVaultError, Result};
use crate::record::{BankCard, BinaryBlob, LoginPassword, SecretData, TextNote};

/// Execute the `add` command.
pub fn execute(cli: &Cli, kind: &AddKind) -> Result<()> {
    let data = build(kind)?;

    let ctx = Context::load(cli)?;
    let (keys, mut vault) = ctx.unlock(cli)?;

    let id = vault.create(&data)?;
    vault.save(&keys)?;

    output::success(&format!("Added {} record {id}", data.kind()));
    output::tip("Run `lockvault sync` to upload it.");

    Ok(())
}

/// Turn arguments into a payload, prompting for anything not given.
pub fn build(kind: &AddKind) -> Result<SecretData> {
    let data = match kind {
        AddKind::Login {
            login,
            password,
            meta,
        } => SecretData::LoginPassword(LoginPassword {
            login: value_or_prompt(login.clone(), "Login")?,
            password: secret_or_prompt(password.clone(), "Password")?.to_string(),
            meta_info: meta.clone(),
        }),
        AddKind::Text { text, meta } => SecretData::Text(TextNote {
            text: value_or_prompt(text.clone(), "Text")?,
            meta_info: meta.clone(),
        }),
        AddKind::Card {
            number,
            expiry,
            cvv,
            meta,
        } => SecretData::BankCard(BankCard {
            card_number: value_or_prompt(number.clone(), "Card number")?,
            expiry_date: value_or_prompt(expiry.clone(), "Expiry date")?,
            cvv: secret_or_prompt(cvv.clone(), "CVV")?.to_string(),
            meta_info: meta.clone(),
        }),
        AddKind::Binary { file, meta } => {
            let data = fs::read(file).map_err(|e| {
                LockVaultError::CommandFailed(format!("cannot read {}: {e}", file.display()))
            })?;
            SecretData::Binary(BinaryBlob {
                data,
                meta_info: meta.clone(),
            })
        }
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordKind;

    #[test]
    fn builds_login_without_prompting() {
        let data = build(&AddKind::Login {
            login: Some("alice".into()),
            password: Some("pw".into()),
            meta: "bank".into(),
        })
        .unwrap();
        assert_eq!(data.kind(), RecordKind::LoginPassword);
        assert_eq!(data.meta_info(), "bank");
    }

    #[test]
    fn builds_binary_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("blob.bin");
        fs::write(&file, [0u8, 255, 16]).unwrap();

        let data = build(&AddKind::Binary {
            file,
            meta: String::new(),
        })
        .unwrap();
        assert_eq!(
            data,
            SecretData::Binary(BinaryBlob {
                data: vec![0, 255, 16],
                meta_info: String::new(),
            })
        );
    }

    #[test]
    fn missing_binary_file_is_an_error() {
        let result = build(&AddKind::Binary {
            file: "/definitely/not/here".into(),
            meta: String::new(),
        });
        assert!(matches!(result, Err(LockVaultError::CommandFailed(_))));
    }
}
