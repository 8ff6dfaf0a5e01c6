use crate::errors::Result;

use super::models::WireRecord;

/// The remote side of a sync, as seen by `SyncEngine`.
///
/// Implemented over HTTP by `ServerClient` and in-process by
/// `InProcessRemote`.
pub trait SyncRemote {
    /// Submit one batch of local changes (upserts and deletes together).
    fn push_changes(&self, token: &str, changes: &[WireRecord]) -> Result<()>;

    /// Fetch every record the token's owner has on the remote.
    fn fetch_all(&self, token: &str) -> Result<Vec<WireRecord>>;
}

impl<R: SyncRemote + ?Sized> SyncRemote for &R {
    fn push_changes(&self, token: &str, changes: &[WireRecord]) -> Result<()> {
        (**self).push_changes(token, changes)
    }

    fn fetch_all(&self, token: &str) -> Result<Vec<WireRecord>> {
        (**self).fetch_all(token)
    }
}
