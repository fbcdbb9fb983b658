//! Store configuration resolution.
//!
//! # Responsibility
//! - Decide where the database lives (file or memory).
//! - Resolve defaults from environment variables.
//!
//! # Invariants
//! - Blank environment values are treated as unset.

use crate::db::DB_NAME;
use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the database file path.
pub const DB_PATH_ENV: &str = "LECTURENOTE_DB_PATH";
/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "LECTURENOTE_LOG_LEVEL";

/// Physical location of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Private to the process; discarded when the handle is dropped.
    Memory,
}

/// Resolved runtime configuration for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    pub log_level: String,
}

impl StoreConfig {
    /// Builds a config from `LECTURENOTE_DB_PATH` / `LECTURENOTE_LOG_LEVEL`.
    ///
    /// Falls back to `<temp dir>/lecture-notes-db.sqlite3` and the build-mode
    /// default log level.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Config backed by an in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            log_level: default_log_level().to_string(),
        }
    }

    /// Replaces the location with the given database file.
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = StoreLocation::File(path.into());
        self
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let location = match non_blank(lookup(DB_PATH_ENV)) {
            Some(path) => StoreLocation::File(PathBuf::from(path)),
            None => StoreLocation::File(default_db_path()),
        };
        let log_level =
            non_blank(lookup(LOG_LEVEL_ENV)).unwrap_or_else(|| default_log_level().to_string());

        Self {
            location,
            log_level,
        }
    }
}

/// Default database file used when nothing is configured.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("{DB_NAME}.sqlite3"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, StoreConfig, StoreLocation, DB_PATH_ENV, LOG_LEVEL_ENV};
    use std::path::PathBuf;

    #[test]
    fn env_values_override_defaults() {
        let config = StoreConfig::from_lookup(|key| match key {
            DB_PATH_ENV => Some(" /data/notes.sqlite3 ".to_string()),
            LOG_LEVEL_ENV => Some("warn".to_string()),
            _ => None,
        });

        assert_eq!(
            config.location,
            StoreLocation::File(PathBuf::from("/data/notes.sqlite3"))
        );
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_env_values_fall_back_to_defaults() {
        let config = StoreConfig::from_lookup(|_| Some("   ".to_string()));

        assert_eq!(config.location, StoreLocation::File(default_db_path()));
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn default_path_uses_fixed_database_name() {
        let path = default_db_path();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("lecture-notes-db.sqlite3")
        );
    }

    #[test]
    fn with_db_path_switches_memory_config_to_file() {
        let config = StoreConfig::in_memory().with_db_path("/tmp/x.sqlite3");
        assert_eq!(
            config.location,
            StoreLocation::File(PathBuf::from("/tmp/x.sqlite3"))
        );
    }
}
