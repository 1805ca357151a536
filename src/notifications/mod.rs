//! Outbound notification dispatch for report lifecycle events

pub mod dispatcher;

pub use dispatcher::{DispatchError, Dispatcher};
