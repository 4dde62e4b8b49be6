//! CLI subcommands

pub mod exec;
pub mod query;

use clap::Args;
use litebind_core::errors::{ErrorKind, LbError};
use litebind_store::{Binder, Database, Result, StoreConfig};
use std::path::PathBuf;

/// Arguments shared by every subcommand
#[derive(Debug, Args)]
pub struct StatementArgs {
    /// Database file (overrides `path` from --config)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// TOML store configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQL statement to run
    #[arg(long)]
    pub sql: String,

    /// Positional parameter bound as text, in order
    #[arg(long = "param")]
    pub params: Vec<String>,

    /// Positional parameter parsed as JSON and bound as a BLOB, after --param values
    #[arg(long = "json-param")]
    pub json_params: Vec<String>,
}

impl StatementArgs {
    /// Open the database named by --db / --config
    pub fn open(&self) -> Result<Database> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::load(path)?,
            None => StoreConfig::default(),
        };
        if let Some(db) = &self.db {
            config.path = Some(db.clone());
        }

        let path = config.path.clone().ok_or_else(|| {
            LbError::new(ErrorKind::InvalidInput)
                .with_op("open")
                .with_message("no database given: pass --db or set path in --config")
        })?;
        Database::open_with_config(path, config)
    }

    /// Bind --param then --json-param values in order
    pub fn bind_all(&self, binder: &mut Binder<'_>) -> Result<()> {
        for param in &self.params {
            binder.bind(param.as_str())?;
        }
        for raw in &self.json_params {
            let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
                LbError::new(ErrorKind::InvalidInput)
                    .with_op("parse_json_param")
                    .with_message(e.to_string())
            })?;
            binder.bind_json(&value)?;
        }
        Ok(())
    }
}
