//! Sync module: reconciles the local vault with a remote store.
//!
//! This module provides:
//! - Wire record and report types (`models`)
//! - The `SyncRemote` seam (`remote`)
//! - `SyncEngine`, the push/pull/rewrite cycle (`engine`)
//! - `ServerClient`, the HTTP transport (`http`)
//! - `InProcessRemote`, a transport that calls a `DataService` directly (`local`)

pub mod engine;
pub mod http;
pub mod local;
pub mod models;
pub mod remote;

pub use engine::SyncEngine;
pub use http::ServerClient;
pub use local::InProcessRemote;
pub use models::{SyncReport, WireRecord};
pub use remote::SyncRemote;
