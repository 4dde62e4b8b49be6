//! litebind core - scoped cleanup, error facility and logging facility
//!
//! This crate provides the pieces shared by the store and the CLI:
//! - `DeferredAction`, an exactly-once scope-exit guard with dismiss
//! - the structured error facility (`LbError`, `ErrorKind`, `LitebindError`)
//! - the logging facility (`init`, `log_op_*` macros, test capture)

pub mod errors;
pub mod guard;
pub mod logging_facility;

// Used by the exported logging macros
pub use litebind_core_types as core_types;

// Re-export commonly used types
pub use errors::{ErrorKind, LbError, LitebindError, Result};
pub use guard::{defer, DeferredAction};
