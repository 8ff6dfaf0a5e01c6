use std::sync::Arc;

use crate::errors::Result;
use crate::server::{AuthProvider, DataService};

use super::models::WireRecord;
use super::remote::SyncRemote;

/// A `SyncRemote` that calls a `DataService` in the same process.
///
/// Several clients can share one instance (or clones of the `Arc`s) to
/// sync against a common store without a network.
#[derive(Clone)]
pub struct InProcessRemote {
    service: Arc<DataService>,
    auth: Arc<dyn AuthProvider>,
}

impl InProcessRemote {
    pub fn new(service: Arc<DataService>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { service, auth }
    }
}

impl SyncRemote for InProcessRemote {
    fn push_changes(&self, token: &str, changes: &[WireRecord]) -> Result<()> {
        let owner = self.auth.owner_for(token)?;
        self.service.sync_changes(&owner, changes.to_vec())
    }

    fn fetch_all(&self, token: &str) -> Result<Vec<WireRecord>> {
        let owner = self.auth.owner_for(token)?;
        self.service.get_data(&owner)
    }
}
