//! Protocol module - command space and transport events.
//!
//! Defines the fixed command enumeration consumed by the dispatch table and
//! the event shapes the transport delivers to the dispatcher.

mod command;
mod event;

pub use command::{CommandCode, RESERVED_COMMAND_CODE};
pub use event::{ConnectionEvent, Endpoint};
