//! Connection event dispatcher.
//!
//! One dispatcher is created per accepted connection and invoked once per
//! delivered transport event, possibly from many execution contexts at
//! once. It is the only place where transport events become asynchronous
//! work or immediate replies:
//!
//! - message with a known command: build the request task and submit it to
//!   the work queue; the task's outcome is never observed here
//! - message with an unknown command: answer the connection directly with a
//!   protocol error and create no task; the connection stays open
//! - disconnect: purge every resource the endpoint owns
//! - anything else: informational record only
//!
//! A disconnect purge is ordered after the event's delivery but gives no
//! guarantee relative to request tasks already submitted for the same
//! endpoint: such a task may execute after the purge and find its
//! resources gone. Task-versus-purge ordering belongs to the work queue,
//! and this layer deliberately leaves it there.

use std::sync::Arc;

use crate::broker::Broker;
use crate::dispatch::DispatchTable;
use crate::protocol::{CommandCode, ConnectionEvent};
use crate::queue::{Request, WorkQueue};
use crate::respond::{ErrorClass, ResponseChannel};
use crate::sink::EventSink;

/// Dispatches transport events for one connection.
///
/// Holds nothing but shared references to its collaborators, all passed at
/// construction; `handle` takes `&self` and never blocks or suspends, so
/// events for unrelated connections (or the same connection) may be
/// dispatched concurrently.
pub struct ConnectionDispatcher {
    table: Arc<DispatchTable>,
    queue: Arc<dyn WorkQueue>,
    broker: Arc<dyn Broker>,
    responder: Arc<dyn ResponseChannel>,
    sink: Arc<dyn EventSink>,
}

impl ConnectionDispatcher {
    /// Create a dispatcher wired to its collaborators.
    pub fn new(
        table: Arc<DispatchTable>,
        queue: Arc<dyn WorkQueue>,
        broker: Arc<dyn Broker>,
        responder: Arc<dyn ResponseChannel>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            table,
            queue,
            broker,
            responder,
            sink,
        }
    }

    /// Handle one delivered transport event.
    pub fn handle(&self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Message {
                endpoint,
                command,
                request_id,
                payload,
            } => {
                let Some(factory) = self.table.resolve(command) else {
                    // Known-but-unregistered and fully unknown codes take the
                    // same path; only the record wording differs.
                    let message = match CommandCode::from_u16(command) {
                        Some(cmd) => {
                            format!("Command {} ({}) not implemented", cmd.name(), command)
                        }
                        None => format!("Command code {} not recognized", command),
                    };
                    self.sink.severe(&message);
                    self.responder.send_error(ErrorClass::ProtocolError, &message);
                    return;
                };

                let task = factory.make(Request {
                    endpoint,
                    command,
                    request_id,
                    payload,
                    responder: self.responder.clone(),
                    broker: self.broker.clone(),
                });
                self.queue.submit(task);
            }
            ConnectionEvent::Disconnect { endpoint } => {
                let purged = self.broker.open_resources().remove_all(endpoint);
                self.sink.info(&format!(
                    "Closing {} open handles from {}",
                    purged, endpoint
                ));
            }
            other => self.sink.info(&other.to_string()),
        }
    }
}
