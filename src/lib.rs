pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod fsutil;
pub mod logging;
pub mod record;
pub mod server;
pub mod sync;
pub mod vault;
