//! Tests for the HTTP transport against a mock sync server.

use std::net::TcpListener;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use lockvault::errors::LockVaultError;
use lockvault::record::RecordStatus;
use lockvault::sync::{ServerClient, SyncRemote, WireRecord};

fn client(server: &Server) -> ServerClient {
    ServerClient::new(&server.url(), Duration::from_secs(5))
}

fn credentials_body() -> Matcher {
    Matcher::Json(json!({"username": "alice", "password": "pw"}))
}

// ---------------------------------------------------------------------------
// Account calls
// ---------------------------------------------------------------------------

#[test]
fn register_posts_credentials_and_expects_201() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/register")
        .match_body(credentials_body())
        .with_status(201)
        .create();

    client(&server).register("alice", "pw").unwrap();
    mock.assert();
}

#[test]
fn register_conflict_is_unexpected_status() {
    let mut server = Server::new();
    server
        .mock("POST", "/register")
        .with_status(409)
        .with_body("taken")
        .create();

    let result = client(&server).register("alice", "pw");
    assert!(matches!(result, Err(LockVaultError::UnexpectedStatus(409))));
}

#[test]
fn login_returns_auth_cookie_value() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/login")
        .match_body(credentials_body())
        .with_status(200)
        .with_header("set-cookie", "AuthToken=tok-123; Path=/; HttpOnly")
        .create();

    let token = client(&server).login("alice", "pw").unwrap();
    assert_eq!(token, "tok-123");
    mock.assert();
}

#[test]
fn login_without_cookie_is_unauthorized() {
    let mut server = Server::new();
    server.mock("POST", "/login").with_status(200).create();

    let result = client(&server).login("alice", "pw");
    assert!(matches!(result, Err(LockVaultError::Unauthorized)));
}

#[test]
fn login_with_bad_password_is_unauthorized() {
    let mut server = Server::new();
    server.mock("POST", "/login").with_status(401).create();

    let result = client(&server).login("alice", "wrong");
    assert!(matches!(result, Err(LockVaultError::Unauthorized)));
}

// ---------------------------------------------------------------------------
// Data calls
// ---------------------------------------------------------------------------

#[test]
fn push_sends_cookie_and_json_array() {
    let now = chrono::Utc::now();
    let record = WireRecord {
        data_id: "id-1".into(),
        data: "AAAA".into(),
        data_type: "TextData".into(),
        status: RecordStatus::Modified,
        created_at: now,
        modified_at: now,
    };

    let mut server = Server::new();
    let mock = server
        .mock("POST", "/data/sync")
        .match_header("cookie", "AuthToken=tok")
        .match_body(Matcher::Json(serde_json::to_value([&record]).unwrap()))
        .with_status(200)
        .create();

    client(&server)
        .push_changes("tok", std::slice::from_ref(&record))
        .unwrap();
    mock.assert();
}

#[test]
fn fetch_parses_records() {
    let body = r#"[{"data_id":"a","data":"AAAA","data_type":"TextData","status":"synced",
        "created_at":"2024-05-01T10:00:00Z","modified_at":"2024-05-01T10:00:00.5Z"}]"#;
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/data")
        .match_header("cookie", "AuthToken=tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create();

    let records = client(&server).fetch_all("tok").unwrap();
    mock.assert();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].data_id, "a");
    assert_eq!(records[0].status, RecordStatus::Synced);
}

#[test]
fn fetch_no_content_is_empty_set() {
    let mut server = Server::new();
    server.mock("GET", "/data").with_status(204).create();

    let records = client(&server).fetch_all("tok").unwrap();
    assert!(records.is_empty());
}

#[test]
fn fetch_garbage_is_malformed_payload() {
    let mut server = Server::new();
    server
        .mock("GET", "/data")
        .with_status(200)
        .with_body("not json")
        .create();

    let result = client(&server).fetch_all("tok");
    assert!(matches!(
        result,
        Err(LockVaultError::MalformedRemotePayload(_))
    ));
}

#[test]
fn expired_session_is_unauthorized() {
    let mut server = Server::new();
    server
        .mock("GET", "/data")
        .match_header("cookie", "AuthToken=old")
        .with_status(401)
        .create();

    let result = client(&server).fetch_all("old");
    assert!(matches!(result, Err(LockVaultError::Unauthorized)));
}

#[test]
fn server_error_is_unexpected_status() {
    let mut server = Server::new();
    server
        .mock("POST", "/data/sync")
        .match_body(Matcher::Json(json!([])))
        .with_status(500)
        .with_body("boom")
        .create();

    let result = client(&server).push_changes("tok", &[]);
    assert!(matches!(result, Err(LockVaultError::UnexpectedStatus(500))));
}

#[test]
fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = ServerClient::new(&format!("http://127.0.0.1:{port}"), Duration::from_secs(5));
    let result = client.fetch_all("tok");
    assert!(matches!(result, Err(LockVaultError::Transport(_))));
}
