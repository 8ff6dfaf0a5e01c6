//! Integration tests for record payload encoding.

use lockvault::errors::LockVaultError;
use lockvault::record::codec::{decode, decode_tagged, encode};
use lockvault::record::{
    BankCard, BinaryBlob, LoginPassword, RecordKind, RecordStatus, SecretData, TextNote,
};

fn samples() -> Vec<SecretData> {
    vec![
        SecretData::LoginPassword(LoginPassword {
            login: "alice".into(),
            password: "p@ss \"quoted\"".into(),
            meta_info: "bank portal".into(),
        }),
        SecretData::Text(TextNote {
            text: "line one\nline two — ünïcode".into(),
            meta_info: String::new(),
        }),
        SecretData::BankCard(BankCard {
            card_number: "4111111111111111".into(),
            expiry_date: "12/27".into(),
            cvv: "123".into(),
            meta_info: "visa".into(),
        }),
        SecretData::Binary(BinaryBlob {
            data: vec![0x00, 0xFF, 0x10],
            meta_info: "note".into(),
        }),
    ]
}

#[test]
fn every_kind_decodes_to_what_was_encoded() {
    for data in samples() {
        let bytes = encode(&data).unwrap();
        assert_eq!(decode(data.kind(), &bytes).unwrap(), data);
        assert_eq!(decode_tagged(data.kind().as_str(), &bytes).unwrap(), data);
    }
}

#[test]
fn encoding_is_deterministic() {
    for data in samples() {
        assert_eq!(encode(&data).unwrap(), encode(&data).unwrap());
    }
}

#[test]
fn bank_card_uses_upper_case_cvv_field() {
    let card = &samples()[2];
    let text = String::from_utf8(encode(card).unwrap()).unwrap();
    assert_eq!(
        text,
        r#"{"CardNumber":"4111111111111111","ExpiryDate":"12/27","CVV":"123","MetaInfo":"visa"}"#
    );
}

#[test]
fn empty_binary_round_trips() {
    let data = SecretData::Binary(BinaryBlob {
        data: Vec::new(),
        meta_info: String::new(),
    });
    let bytes = encode(&data).unwrap();
    assert_eq!(bytes, br#"{"Data":"","MetaInfo":""}"#);
    assert_eq!(decode(RecordKind::Binary, &bytes).unwrap(), data);
}

#[test]
fn unknown_fields_are_rejected() {
    let result = decode(
        RecordKind::Text,
        br#"{"Text":"t","MetaInfo":"","Extra":1}"#,
    );
    assert!(matches!(result, Err(LockVaultError::MalformedPayload(_))));
}

#[test]
fn missing_fields_are_rejected() {
    let result = decode(RecordKind::LoginPassword, br#"{"Login":"a"}"#);
    assert!(matches!(result, Err(LockVaultError::MalformedPayload(_))));
}

#[test]
fn non_json_is_rejected() {
    let result = decode(RecordKind::Text, b"\xff\xfe not json");
    assert!(matches!(result, Err(LockVaultError::MalformedPayload(_))));
}

#[test]
fn kind_tags_round_trip_and_reject_unknown() {
    for kind in RecordKind::ALL {
        assert_eq!(RecordKind::parse(kind.as_str()).unwrap(), kind);
    }
    assert!(matches!(
        RecordKind::parse(""),
        Err(LockVaultError::UnknownRecordKind(_))
    ));
    assert!(matches!(
        RecordKind::parse("textdata"),
        Err(LockVaultError::UnknownRecordKind(_))
    ));
}

#[test]
fn status_wire_form_is_lowercase() {
    let json = serde_json::to_string(&[
        RecordStatus::Created,
        RecordStatus::Modified,
        RecordStatus::Deleted,
        RecordStatus::Synced,
    ])
    .unwrap();
    assert_eq!(json, r#"["created","modified","deleted","synced"]"#);
}
