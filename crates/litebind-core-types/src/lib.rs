//! Core types shared across litebind facilities
//!
//! - **Schema constants**: canonical field keys and event names used by the
//!   logging facility and by the store's operation events

pub mod schema;
