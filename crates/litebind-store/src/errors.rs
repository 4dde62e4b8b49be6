//! Error handling for litebind-store
//!
//! Wraps litebind-core LbError with store-specific helpers

use litebind_core::errors::{ErrorKind, LbError, LitebindError};

/// Result type alias using LbError
pub type Result<T> = std::result::Result<T, LbError>;

/// Create a database error from rusqlite::Error
///
/// Column conversion failures are classified as `Decode` so callers can tell
/// bad stored bytes apart from driver failures.
pub fn from_rusqlite(err: rusqlite::Error) -> LbError {
    match &err {
        rusqlite::Error::FromSqlConversionFailure(column, _, _)
        | rusqlite::Error::InvalidColumnType(column, _, _)
        | rusqlite::Error::IntegralValueOutOfRange(column, _) => {
            LbError::new(ErrorKind::Decode)
                .with_op("read_column")
                .with_column(*column)
                .with_message(err.to_string())
        }
        rusqlite::Error::ToSqlConversionFailure(_) => LbError::new(ErrorKind::Serialization)
            .with_op("bind")
            .with_message(err.to_string()),
        _ => LbError::new(ErrorKind::Sqlite)
            .with_op("sqlite")
            .with_message(err.to_string()),
    }
}

/// Create a bind error for the 1-based parameter `index`
pub fn bind_error(index: usize, err: rusqlite::Error) -> LbError {
    from_rusqlite(err).with_op("bind").with_column(index)
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> LbError {
    LitebindError::InvalidConfig {
        reason: reason.into(),
    }
    .into()
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> LbError {
    LbError::new(ErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_failure_is_decode() {
        let err = rusqlite::Error::InvalidColumnType(
            2,
            "payload".to_string(),
            rusqlite::types::Type::Null,
        );

        let lb_err = from_rusqlite(err);
        assert_eq!(lb_err.kind(), ErrorKind::Decode);
        assert_eq!(lb_err.column(), Some(2));
    }

    #[test]
    fn test_driver_failure_is_sqlite() {
        let lb_err = from_rusqlite(rusqlite::Error::InvalidQuery);
        assert_eq!(lb_err.kind(), ErrorKind::Sqlite);
        assert_eq!(lb_err.code(), "ERR_SQLITE");
    }

    #[test]
    fn test_bind_error_records_index() {
        let lb_err = bind_error(4, rusqlite::Error::InvalidParameterCount(4, 3));
        assert_eq!(lb_err.op(), Some("bind"));
        assert_eq!(lb_err.column(), Some(4));
    }
}
