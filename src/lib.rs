//! # filebroker
//!
//! Connection-event dispatch layer for a network-facing file-broker
//! service.
//!
//! The async transport delivers one [`ConnectionEvent`] per inbound
//! message, disconnect, or other notice. The [`ConnectionDispatcher`]
//! routes each event: recognized commands become [`RequestTask`]s on the
//! [`WorkQueue`], unrecognized commands are answered immediately with a
//! protocol error on the [`ResponseChannel`], and a disconnect purges the
//! endpoint's entries from the [`OpenResourceRegistry`].
//!
//! ## Architecture
//!
//! ```text
//! transport ─► ConnectionDispatcher ─┬─► DispatchTable ─► WorkQueue
//!                                    ├─► ResponseChannel (protocol errors)
//!                                    └─► OpenResourceRegistry (disconnect purge)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use filebroker::{
//!     CommandCode, ConnectionDispatcher, DispatchTable, Request, TaskQueue, TracingSink,
//! };
//!
//! let sink = Arc::new(TracingSink);
//!
//! let mut table = DispatchTable::new();
//! table.register(CommandCode::Open, |request: Request| open_task(request))?;
//! // ... one entry per command ...
//!
//! let dispatcher = ConnectionDispatcher::new(
//!     Arc::new(table),
//!     Arc::new(TaskQueue::new(256, sink.clone())),
//!     broker,
//!     responder,
//!     sink,
//! );
//!
//! // Invoked by the transport, once per delivered event.
//! dispatcher.handle(event);
//! ```

pub mod broker;
pub mod codec;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod queue;
pub mod registry;
pub mod respond;
pub mod sink;

pub use broker::Broker;
pub use dispatch::{ConnectionDispatcher, DispatchTable, HandlerFactory};
pub use error::{BrokerError, Result};
pub use protocol::{CommandCode, ConnectionEvent, Endpoint};
pub use queue::{Request, RequestTask, TaskQueue, WorkQueue};
pub use registry::{OpenResourceRegistry, ResourceId};
pub use respond::{
    spawn_response_writer, spawn_response_writer_default, ErrorClass, ResponseChannel,
    ResponseWriter,
};
pub use sink::{EventSink, TracingSink};
