//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use litebind_core::log_op_start;
/// log_op_start!("extract");
/// log_op_start!("extract", sql = "SELECT 1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use litebind_core::log_op_end;
/// log_op_end!("extract", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` is anything convertible into `LbError`.
///
/// # Example
///
/// ```
/// # use litebind_core::{log_op_error, errors::LitebindError};
/// let err = LitebindError::NoRows { sql: "SELECT 1".to_string() };
/// log_op_error!("extract", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let lb_err: $crate::errors::LbError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?lb_err.kind(),
            err.code = lb_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let lb_err: $crate::errors::LbError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?lb_err.kind(),
            err.code = lb_err.code(),
            $($field)*
        );
    }};
}

/// Log an operation that left its scope without an `end` event
///
/// Usually emitted from a `DeferredAction` that is dismissed on success.
///
/// # Example
///
/// ```
/// # use litebind_core::log_op_aborted;
/// log_op_aborted!("extract", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_aborted {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_ABORTED,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_ABORTED,
            duration_ms = $duration,
            $($field)*
        );
    };
}
