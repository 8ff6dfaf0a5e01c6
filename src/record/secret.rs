//! The four secret shapes a record can carry.
//!
//! Every shape has its own fields plus a free-text `meta_info`.

use serde::{Deserialize, Serialize};

use super::kind::RecordKind;

/// A login/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct LoginPassword {
    pub login: String,
    pub password: String,
    pub meta_info: String,
}

/// A free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TextNote {
    pub text: String,
    pub meta_info: String,
}

/// Bank card details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct BankCard {
    pub card_number: String,
    pub expiry_date: String,
    #[serde(rename = "CVV")]
    pub cvv: String,
    pub meta_info: String,
}

/// Arbitrary bytes.  Serialized through the codec, which base64-encodes
/// `data` so the canonical form stays valid text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBlob {
    pub data: Vec<u8>,
    pub meta_info: String,
}

/// A decoded record payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretData {
    LoginPassword(LoginPassword),
    Text(TextNote),
    BankCard(BankCard),
    Binary(BinaryBlob),
}

impl SecretData {
    /// The kind tag for this payload, fixed by the variant.
    pub fn kind(&self) -> RecordKind {
        match self {
            SecretData::LoginPassword(_) => RecordKind::LoginPassword,
            SecretData::Text(_) => RecordKind::Text,
            SecretData::BankCard(_) => RecordKind::BankCard,
            SecretData::Binary(_) => RecordKind::Binary,
        }
    }

    pub fn meta_info(&self) -> &str {
        match self {
            SecretData::LoginPassword(v) => &v.meta_info,
            SecretData::Text(v) => &v.meta_info,
            SecretData::BankCard(v) => &v.meta_info,
            SecretData::Binary(v) => &v.meta_info,
        }
    }

    pub fn set_meta_info(&mut self, meta_info: String) {
        match self {
            SecretData::LoginPassword(v) => v.meta_info = meta_info,
            SecretData::Text(v) => v.meta_info = meta_info,
            SecretData::BankCard(v) => v.meta_info = meta_info,
            SecretData::Binary(v) => v.meta_info = meta_info,
        }
    }
}
