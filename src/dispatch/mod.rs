//! Dispatch module - command table and connection event dispatcher.
//!
//! [`DispatchTable`] resolves command codes to handler factories;
//! [`ConnectionDispatcher`] consumes transport events and turns them into
//! queued work, direct error replies, or resource teardown.

mod connection;
mod table;

pub use connection::ConnectionDispatcher;
pub use table::{DispatchTable, HandlerFactory};
