//! Scope-exit guard
//!
//! `DeferredAction` owns a zero-argument cleanup closure and runs it exactly
//! once when the guard goes out of scope, whether the scope is left normally,
//! through an early `?` return, or by a panic unwinding through it. Calling
//! [`DeferredAction::dismiss`] first cancels the action.
//!
//! # Example
//!
//! ```
//! use litebind_core::guard::DeferredAction;
//! use std::cell::RefCell;
//!
//! let log = RefCell::new(Vec::new());
//! {
//!     let _undo = DeferredAction::new(|| log.borrow_mut().push("undo"));
//! }
//! assert_eq!(*log.borrow(), vec!["undo"]);
//! ```
//!
//! # Panics inside the action
//!
//! The action must not panic. If it does while the guard is being dropped,
//! the failure is logged and the process is aborted, whether or not another
//! panic was already unwinding. An explicit [`DeferredAction::fire`] is not
//! a scope exit, so a panic there reaches the caller.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Runs its action once at scope exit unless dismissed
///
/// The guard is move-only, so the action can never be duplicated.
#[must_use = "the action runs immediately if the guard is not bound to a variable"]
pub struct DeferredAction<F>
where
    F: FnOnce(),
{
    action: Option<F>,
}

impl<F> DeferredAction<F>
where
    F: FnOnce(),
{
    /// Create an armed guard holding `action`
    pub fn new(action: F) -> Self {
        Self {
            action: Some(action),
        }
    }

    /// Cancel the pending action
    ///
    /// Idempotent, and a no-op once the action has fired.
    pub fn dismiss(&mut self) {
        self.action = None;
    }

    /// Run the action now if still armed, then disarm
    ///
    /// A panic raised by the action propagates to the caller; the guard is
    /// disarmed either way.
    pub fn fire(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }

    /// Whether the action is still pending
    pub fn is_armed(&self) -> bool {
        self.action.is_some()
    }
}

impl<F> Drop for DeferredAction<F>
where
    F: FnOnce(),
{
    fn drop(&mut self) {
        let Some(action) = self.action.take() else {
            return;
        };

        if panic::catch_unwind(AssertUnwindSafe(action)).is_err() {
            tracing::error!(
                component = module_path!(),
                op = "deferred_action",
                unwinding = std::thread::panicking(),
                "deferred action panicked at scope exit, aborting"
            );
            std::process::abort();
        }
    }
}

impl<F> fmt::Debug for DeferredAction<F>
where
    F: FnOnce(),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Shorthand for [`DeferredAction::new`]
pub fn defer<F>(action: F) -> DeferredAction<F>
where
    F: FnOnce(),
{
    DeferredAction::new(action)
}
