//! Transport events delivered to the connection dispatcher.
//!
//! The async transport owns connection I/O and surfaces one
//! [`ConnectionEvent`] per delivered notice. Every event belongs to exactly
//! one [`Endpoint`]; the payload rides along as zero-copy `bytes::Bytes`.

use std::fmt;
use std::net::SocketAddr;

use bytes::Bytes;

/// Identifier of a connection's remote peer.
///
/// Stable for the life of one connection. The transport never reuses an
/// address while resources registered under the old connection remain
/// unpurged.
pub type Endpoint = SocketAddr;

/// A transport-level event for one connection.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ConnectionEvent {
    /// An inbound request message.
    Message {
        /// Originating peer.
        endpoint: Endpoint,
        /// Raw command code. Kept as `u16` at this boundary: unknown codes
        /// are valid input and resolve at dispatch time.
        command: u16,
        /// Correlation id echoed in responses.
        request_id: u32,
        /// Opaque request payload.
        payload: Bytes,
    },
    /// The peer went away. Terminal for the connection, not the process.
    Disconnect {
        /// The departed peer.
        endpoint: Endpoint,
    },
    /// Transport finished establishing the connection.
    Established {
        /// The new peer.
        endpoint: Endpoint,
    },
}

impl ConnectionEvent {
    /// The endpoint this event belongs to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ConnectionEvent::Message { endpoint, .. }
            | ConnectionEvent::Disconnect { endpoint }
            | ConnectionEvent::Established { endpoint } => *endpoint,
        }
    }
}

impl fmt::Display for ConnectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionEvent::Message {
                endpoint,
                command,
                request_id,
                payload,
            } => write!(
                f,
                "MESSAGE from {} (command={}, request={}, {} bytes)",
                endpoint,
                command,
                request_id,
                payload.len()
            ),
            ConnectionEvent::Disconnect { endpoint } => {
                write!(f, "DISCONNECT from {}", endpoint)
            }
            ConnectionEvent::Established { endpoint } => {
                write!(f, "ESTABLISHED from {}", endpoint)
            }
        }
    }
}
