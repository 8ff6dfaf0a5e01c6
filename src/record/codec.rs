//! Canonical byte form of record payloads.
//!
//! Payloads are compact JSON objects whose field order is fixed by the
//! struct declarations, so encoding is deterministic.  Binary payloads
//! carry their bytes as standard base64 text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::kind::RecordKind;
use super::secret::{BinaryBlob, SecretData};
use crate::errors::{LockVaultError, Result};

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct BinaryOut<'a> {
    data: String,
    meta_info: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct BinaryIn {
    data: String,
    meta_info: String,
}

/// Serialize a payload to its canonical bytes.
pub fn encode(data: &SecretData) -> Result<Vec<u8>> {
    let bytes = match data {
        SecretData::LoginPassword(v) => serde_json::to_vec(v),
        SecretData::Text(v) => serde_json::to_vec(v),
        SecretData::BankCard(v) => serde_json::to_vec(v),
        SecretData::Binary(v) => serde_json::to_vec(&BinaryOut {
            data: BASE64.encode(&v.data),
            meta_info: &v.meta_info,
        }),
    };
    bytes.map_err(|e| LockVaultError::Serialization(format!("{} payload: {e}", data.kind())))
}

/// Parse canonical bytes as a payload of the given kind.
pub fn decode(kind: RecordKind, bytes: &[u8]) -> Result<SecretData> {
    match kind {
        RecordKind::LoginPassword => parse(kind, bytes).map(SecretData::LoginPassword),
        RecordKind::Text => parse(kind, bytes).map(SecretData::Text),
        RecordKind::BankCard => parse(kind, bytes).map(SecretData::BankCard),
        RecordKind::Binary => {
            let raw: BinaryIn = parse(kind, bytes)?;
            let data = BASE64
                .decode(raw.data.as_bytes())
                .map_err(|e| LockVaultError::InvalidTextEncoding(format!("binary data: {e}")))?;
            Ok(SecretData::Binary(BinaryBlob {
                data,
                meta_info: raw.meta_info,
            }))
        }
    }
}

/// Parse canonical bytes using a textual kind tag.
pub fn decode_tagged(tag: &str, bytes: &[u8]) -> Result<SecretData> {
    decode(RecordKind::parse(tag)?, bytes)
}

fn parse<T: DeserializeOwned>(kind: RecordKind, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| LockVaultError::MalformedPayload(format!("{kind}: {e}")))
}
