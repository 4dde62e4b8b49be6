use thiserror::Error;

/// Result type alias using LbError
pub type Result<T> = std::result::Result<T, LbError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Statement execution
    /// Error reported by the SQLite driver
    Sqlite,
    /// Extraction found no rows while `ThrowOnNoRows` was set
    NoRows,
    /// Single-value extraction found more than one row
    ExtraRows,

    // Column conversion
    /// Column bytes could not be decoded into the requested value
    Decode,
    /// Value could not be encoded for binding
    Serialization,

    // Setup
    Config,
    InvalidInput,
    Io,

    // Internal
    Internal,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Sqlite => "ERR_SQLITE",
            ErrorKind::NoRows => "ERR_NO_ROWS",
            ErrorKind::ExtraRows => "ERR_EXTRA_ROWS",
            ErrorKind::Decode => "ERR_DECODE",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
            ErrorKind::Config => "ERR_CONFIG",
            ErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus statement
/// context (operation, SQL text, column or parameter index) for debugging.
#[derive(Debug, Clone)]
pub struct LbError {
    kind: ErrorKind,
    op: Option<String>,
    sql: Option<String>,
    column: Option<usize>,
    message: String,
    source: Option<Box<LbError>>,
}

impl LbError {
    /// Create a new error with the specified kind
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            op: None,
            sql: None,
            column: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the SQL text of the statement involved
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Add column (or 1-based parameter) index context
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: LbError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the SQL text, if any
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Get the column or parameter index, if any
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&LbError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for LbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(column) = self.column {
            write!(f, " (column: {})", column)?;
        }
        if let Some(sql) = &self.sql {
            write!(f, " (sql: {})", sql)?;
        }
        Ok(())
    }
}

impl std::error::Error for LbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised by litebind itself (as opposed to the driver)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LitebindError {
    /// Extraction returned no rows and the binder requires at least one
    #[error("No rows returned!")]
    NoRows { sql: String },

    /// A single-value extraction saw a second row
    #[error("not all rows extracted")]
    ExtraRows { sql: String },

    /// Column bytes were not a valid encoding of the requested type
    #[error("Cannot decode column {column}: {reason}")]
    Decode { column: usize, reason: String },

    /// Value could not be serialized for binding
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<LitebindError> for LbError {
    fn from(err: LitebindError) -> Self {
        let message = err.to_string();
        match err {
            LitebindError::NoRows { sql } => LbError::new(ErrorKind::NoRows)
                .with_op("extract")
                .with_sql(sql)
                .with_message(message),

            LitebindError::ExtraRows { sql } => LbError::new(ErrorKind::ExtraRows)
                .with_op("extract_single")
                .with_sql(sql)
                .with_message(message),

            LitebindError::Decode { column, .. } => LbError::new(ErrorKind::Decode)
                .with_column(column)
                .with_message(message),

            LitebindError::Serialization { .. } => {
                LbError::new(ErrorKind::Serialization).with_message(message)
            }

            LitebindError::InvalidConfig { .. } => {
                LbError::new(ErrorKind::Config).with_message(message)
            }

            LitebindError::Internal { .. } => {
                LbError::new(ErrorKind::Internal).with_message(message)
            }
        }
    }
}
