//! Store configuration
//!
//! Connection pragmas and binder defaults, loadable from TOML:
//!
//! ```toml
//! path = "app.db"
//! foreign_keys = true
//! journal_mode = "wal"
//! busy_timeout_ms = 5000
//! throw_on_no_rows = false
//! ```

use crate::errors::{config_error, io_error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// SQLite journal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    Wal,
    Off,
}

impl JournalMode {
    /// Value for `PRAGMA journal_mode`
    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        }
    }
}

/// Connection and binder settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; `None` means the caller supplies the location
    pub path: Option<PathBuf>,
    pub foreign_keys: bool,
    pub journal_mode: JournalMode,
    pub busy_timeout_ms: Option<u64>,
    /// Pushes `Flag::ThrowOnNoRows` onto every prepared binder
    pub throw_on_no_rows: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            foreign_keys: true,
            journal_mode: JournalMode::Wal,
            busy_timeout_ms: None,
            throw_on_no_rows: false,
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(e.to_string()))
    }

    /// Read and parse a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| io_error("read_config", e))?;
        Self::from_toml_str(&text)
    }
}
