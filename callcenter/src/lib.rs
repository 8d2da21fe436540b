//! `desk-callcenter` — call-center contract tracker.
//!
//! REST backend for contract intake and four-phase call handling
//! (entry → preconfirm → handling → postconfirm → completed), backed by
//! flat JSON files. Every request re-reads its backing file; there is no
//! cross-request cache and no locking, so the last writer wins.

pub mod http;
pub mod manager;
pub mod models;
pub mod persistence;
pub mod phase;
pub mod protocol;
pub mod stats;

/// Default listen address. Override with `DESK_CALLCENTER_BIND`.
pub const DEFAULT_BIND: &str = "127.0.0.1:10000";

/// Environment variable naming the database directory.
pub const DATA_DIR_ENV: &str = "DESK_DATA_DIR";

/// Default database directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "database";

/// Resolve the database directory from the environment.
pub fn data_dir_from_env() -> std::path::PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from(DEFAULT_DATA_DIR))
}
