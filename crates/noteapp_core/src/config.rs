//! Process configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path and logging settings for CLI/FFI entry points.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Resolution never fails; invalid log levels surface later from
//!   `LogSettings::from_config`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTEAPP_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "NOTEAPP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "NOTEAPP_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "noteapp.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file backing the note repository.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to its
    /// raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

/// Default SQLite location under the OS temp directory.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
