//! Environment-driven store configuration.
//!
//! # Responsibility
//! - Resolve database path and logging settings for embedding processes.
//!
//! # Invariants
//! - Missing variables fall back to defaults; blank values count as missing.
//! - The caller owns the connection opened from this config.

use crate::db::{open_db, DbResult};
use crate::logging::{default_log_level, init_logging, LogLevel};
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "STUREG_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "STUREG_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "STUREG_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "stureg.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads `STUREG_*` variables from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// # Errors
    /// - `STUREG_LOG_LEVEL` is set to an unknown level.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level = LogLevel::parse(&level)?;
        }
        config.log_dir = read(LOG_DIR_VAR).map(PathBuf::from);
        Ok(config)
    }

    /// Starts file logging when a log directory is configured.
    pub fn init_logging(&self) -> Result<(), String> {
        match &self.log_dir {
            Some(dir) => init_logging(self.log_level.as_str(), dir),
            None => Ok(()),
        }
    }

    /// Opens and migrates the configured database.
    pub fn open_db(&self) -> DbResult<Connection> {
        open_db(&self.db_path)
    }
}
