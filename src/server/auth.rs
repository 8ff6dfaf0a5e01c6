//! Session token to owner mapping.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::errors::{LockVaultError, Result};

/// Resolves an opaque session token to the owner it was issued for.
pub trait AuthProvider: Send + Sync {
    /// `Unauthorized` if the token is unknown.
    fn owner_for(&self, token: &str) -> Result<String>;
}

/// In-memory session table for in-process wiring.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh random token for `owner`.
    pub fn issue(&self, owner: &str) -> Result<String> {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .map_err(|e| LockVaultError::Storage(format!("session lock poisoned: {e}")))?
            .insert(token.clone(), owner.to_string());
        Ok(token)
    }

    /// Forget a token.  Unknown tokens are ignored.
    pub fn revoke(&self, token: &str) -> Result<()> {
        self.sessions
            .write()
            .map_err(|e| LockVaultError::Storage(format!("session lock poisoned: {e}")))?
            .remove(token);
        Ok(())
    }
}

impl AuthProvider for SessionTable {
    fn owner_for(&self, token: &str) -> Result<String> {
        self.sessions
            .read()
            .map_err(|e| LockVaultError::Storage(format!("session lock poisoned: {e}")))?
            .get(token)
            .cloned()
            .ok_or(LockVaultError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_resolves_until_revoked() {
        let table = SessionTable::new();
        let token = table.issue("alice").unwrap();
        assert_eq!(table.owner_for(&token).unwrap(), "alice");

        table.revoke(&token).unwrap();
        assert!(matches!(
            table.owner_for(&token),
            Err(LockVaultError::Unauthorized)
        ));
    }

    #[test]
    fn tokens_are_distinct() {
        let table = SessionTable::new();
        assert_ne!(table.issue("a").unwrap(), table.issue("a").unwrap());
    }
}
