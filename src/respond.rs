//! Error classification and the per-connection response channel.
//!
//! The dispatcher answers protocol errors directly on the connection,
//! without touching the work queue. [`ResponseChannel`] is the narrow seam
//! it goes through; [`ResponseWriter`] is the tokio-backed implementation.
//! A dedicated writer task owns the connection's write half and receives
//! frames over an mpsc channel, so senders never lock or await.
//!
//! # Wire format
//!
//! Each reply frame is a u32 big-endian length prefix followed by a
//! MsgPack-encoded [`ErrorBody`] (numeric classification code, then the
//! human-readable text).

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::codec::MsgPackCodec;
use crate::error::{BrokerError, Result};

/// Default capacity of a connection's writer channel.
pub const DEFAULT_RESPONSE_CAPACITY: usize = 64;

/// Error classification carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorClass {
    /// Command code not present in the dispatch table, or not handled.
    ProtocolError,
}

impl ErrorClass {
    /// Numeric wire code for this classification.
    #[inline]
    pub fn code(self) -> u16 {
        match self {
            ErrorClass::ProtocolError => 1,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::ProtocolError => write!(f, "PROTOCOL_ERROR"),
        }
    }
}

/// Per-connection channel for immediate replies from the dispatcher.
///
/// `send_error` is fire-and-forget: implementations must not block the
/// caller, which sits inline on the transport's event-delivery path.
pub trait ResponseChannel: Send + Sync {
    /// Send an error reply on this connection.
    fn send_error(&self, class: ErrorClass, message: &str);
}

/// Body of an error reply frame.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// Wire code of the [`ErrorClass`].
    pub code: u16,
    /// Human-readable description; includes the offending command code.
    pub message: String,
}

/// Cloneable handle to a connection's writer task.
#[derive(Clone)]
pub struct ResponseWriter {
    tx: mpsc::Sender<Vec<u8>>,
}

impl ResponseWriter {
    /// Encode and queue an error frame without waiting.
    ///
    /// # Errors
    ///
    /// `ChannelFull` when the writer is backed up, `ConnectionClosed` when
    /// the writer task is gone.
    pub fn try_send_error(&self, class: ErrorClass, message: &str) -> Result<()> {
        let body = MsgPackCodec::encode(&ErrorBody {
            code: class.code(),
            message: message.to_string(),
        })?;
        self.tx.try_send(body).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => BrokerError::ChannelFull,
            mpsc::error::TrySendError::Closed(_) => BrokerError::ConnectionClosed,
        })
    }
}

impl ResponseChannel for ResponseWriter {
    fn send_error(&self, class: ErrorClass, message: &str) {
        if let Err(e) = self.try_send_error(class, message) {
            tracing::warn!("Dropping {} reply ({}): {}", class, e, message);
        }
    }
}

/// Spawn the writer task for a connection's write half.
///
/// Returns the sending handle and the task's `JoinHandle`. The task exits
/// cleanly when every handle has been dropped.
pub fn spawn_response_writer<W>(
    writer: W,
    capacity: usize,
) -> (ResponseWriter, JoinHandle<Result<()>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity);
    let task = tokio::spawn(writer_loop(rx, writer));
    (ResponseWriter { tx }, task)
}

/// Spawn the writer task with the default channel capacity.
pub fn spawn_response_writer_default<W>(writer: W) -> (ResponseWriter, JoinHandle<Result<()>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    spawn_response_writer(writer, DEFAULT_RESPONSE_CAPACITY)
}

/// Writer loop - receives encoded bodies and writes length-prefixed frames.
async fn writer_loop<W>(mut rx: mpsc::Receiver<Vec<u8>>, mut writer: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(body) = rx.recv().await {
        writer.write_all(&(body.len() as u32).to_be_bytes()).await?;
        writer.write_all(&body).await?;
        writer.flush().await?;
    }
    Ok(())
}
