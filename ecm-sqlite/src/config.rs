//! Configuration for the SQLite database connection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the database lives and how to open it.
///
/// # Examples
///
/// ```
/// use ecm_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// // In-memory database (default)
/// let config = SqliteConfig::default();
///
/// // File-based database, waiting up to ten seconds on a locked database
/// let config = SqliteConfig {
///     database_path: Some(PathBuf::from("contracts.db")),
///     busy_timeout_secs: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// Database file path. If None, uses an in-memory database
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Whether to create the database file if it doesn't exist
    #[serde(default = "default_true")]
    pub create_if_missing: bool,

    /// How long a connection waits on a locked database before giving up
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_busy_timeout() -> u64 {
    5
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}
