//! Blocking HTTP transport for the sync protocol.
//!
//! Endpoints (all relative to the configured server address):
//!
//! - `POST /register` with `{"username","password"}` answers 201.
//! - `POST /login` with the same body answers 200 and sets the
//!   `AuthToken` cookie.
//! - `POST /data/sync` with a JSON array of wire records answers 200.
//! - `GET /data` answers 200 with a JSON array, or 204 when empty.
//!
//! One attempt per call; nothing retries.

use std::time::Duration;

use tracing::{debug, warn};
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::errors::{LockVaultError, Result};

use super::models::{Credentials, WireRecord};
use super::remote::SyncRemote;

/// Name of the session cookie set by `/login`.
pub const AUTH_COOKIE: &str = "AuthToken";

/// HTTP client for one sync server.
pub struct ServerClient {
    base_url: String,
    agent: Agent,
}

impl ServerClient {
    pub fn new(server_address: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            base_url: server_address.trim_end_matches('/').to_string(),
            agent: Agent::new_with_config(config),
        }
    }

    /// Create an account.  Expects 201.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        let resp = self
            .agent
            .post(&self.url("/register"))
            .send_json(&credentials(username, password))
            .map_err(transport)?;
        expect_status(&resp, 201)?;
        debug!(username, "registered");
        Ok(())
    }

    /// Log in and return the session token from the `AuthToken` cookie.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let resp = self
            .agent
            .post(&self.url("/login"))
            .send_json(&credentials(username, password))
            .map_err(transport)?;
        expect_status(&resp, 200)?;

        let token = resp
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(auth_token_from_cookie);

        match token {
            Some(token) => {
                debug!(username, "logged in");
                Ok(token)
            }
            None => {
                warn!("login response carried no {AUTH_COOKIE} cookie");
                Err(LockVaultError::Unauthorized)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SyncRemote for ServerClient {
    fn push_changes(&self, token: &str, changes: &[WireRecord]) -> Result<()> {
        let resp = self
            .agent
            .post(&self.url("/data/sync"))
            .header("Cookie", &cookie_header(token))
            .send_json(changes)
            .map_err(transport)?;
        expect_status(&resp, 200)
    }

    fn fetch_all(&self, token: &str) -> Result<Vec<WireRecord>> {
        let mut resp = self
            .agent
            .get(&self.url("/data"))
            .header("Cookie", &cookie_header(token))
            .call()
            .map_err(transport)?;

        if resp.status().as_u16() == 204 {
            return Ok(Vec::new());
        }
        expect_status(&resp, 200)?;

        resp.body_mut()
            .read_json::<Vec<WireRecord>>()
            .map_err(|e| LockVaultError::MalformedRemotePayload(e.to_string()))
    }
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn cookie_header(token: &str) -> String {
    format!("{AUTH_COOKIE}={token}")
}

fn transport(err: ureq::Error) -> LockVaultError {
    LockVaultError::Transport(err.to_string())
}

fn expect_status(resp: &Response<Body>, expected: u16) -> Result<()> {
    match resp.status().as_u16() {
        code if code == expected => Ok(()),
        401 => Err(LockVaultError::Unauthorized),
        code => Err(LockVaultError::UnexpectedStatus(code)),
    }
}

/// Extract the token from a `Set-Cookie` value such as
/// `AuthToken=abc; Path=/; HttpOnly`.
fn auth_token_from_cookie(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    (name.trim() == AUTH_COOKIE && !value.is_empty()).then(|| value.trim().to_string())
}
