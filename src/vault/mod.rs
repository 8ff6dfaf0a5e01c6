//! Vault module: the client's encrypted record store.
//!
//! This module provides:
//! - The JSON vault file format with per-record encryption (`format`)
//! - `LocalVault`, the in-memory handle used by commands and sync (`store`)

pub mod format;
pub mod store;

pub use format::VaultEntry;
pub use store::LocalVault;
