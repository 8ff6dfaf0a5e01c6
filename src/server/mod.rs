//! Server module: the remote side of sync.
//!
//! This module provides:
//! - Storage capability traits and the stored record shape (`repository`)
//! - A SQLite backend (`sqlite`, behind the `sqlite-store` feature)
//! - An in-memory backend (`memory`)
//! - `DataService`, which applies client pushes and serves pulls (`service`)
//! - `AuthProvider` and an in-memory session table (`auth`)

pub mod auth;
pub mod memory;
pub mod repository;
pub mod service;
#[cfg(feature = "sqlite-store")]
pub mod sqlite;

pub use auth::{AuthProvider, SessionTable};
pub use memory::MemoryRepository;
pub use repository::{RecordDeleter, RecordReader, RecordUpserter, StoredRecord};
pub use service::DataService;
#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteRepository;
