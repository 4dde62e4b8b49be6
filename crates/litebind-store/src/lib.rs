//! litebind store - SQLite access wrapper with JSON blob columns
//!
//! Provides:
//! - `Database`: open / adopt a connection and apply `StoreConfig`
//! - `Binder`: positional binding, per-statement options, row and
//!   single-value extraction with no-rows / extra-rows checks
//! - JSON blob columns (`JsonBlob`, `JsonArray`, `JsonObject`)
//! - NULL-to-default column reads

pub mod binder;
pub mod column;
pub mod config;
pub mod db;
pub mod errors;
pub mod json;
pub mod options;

// Re-export key types
pub use binder::Binder;
pub use column::column_or_default;
pub use config::{JournalMode, StoreConfig};
pub use db::Database;
pub use errors::Result;
pub use json::{read_json_column, JsonArray, JsonBlob, JsonFormat, JsonObject};
pub use options::{BindOption, Flag};
