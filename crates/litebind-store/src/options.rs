//! Per-statement binder options
//!
//! An option is a named integer. The binder consults its own flags during
//! extraction; extensions (such as the JSON columns) register options under
//! their own name and look them up while binding.

/// Option name used for the binder's built-in flags
pub const SQLITE_FLAG: &str = "sqlite_flag";

/// Built-in binder flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Extraction that sees no rows fails with `ERR_NO_ROWS`
    ThrowOnNoRows = 0,
}

/// A named option attached to a binder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOption {
    pub name: String,
    pub value: i32,
}

impl BindOption {
    pub fn new(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Whether this option has the given name and value
    pub fn matches(&self, name: &str, value: i32) -> bool {
        self.name == name && self.value == value
    }
}

impl From<Flag> for BindOption {
    fn from(flag: Flag) -> Self {
        BindOption::new(SQLITE_FLAG, flag as i32)
    }
}
