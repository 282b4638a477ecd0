//! Error types for filebroker.

use thiserror::Error;

/// Main error type for all dispatch-layer operations.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// I/O error while writing to a connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// A command code was registered twice in a dispatch table.
    #[error("Command code {0} already registered")]
    DuplicateCommand(u16),

    /// A resource id is already tracked by the registry.
    #[error("Resource id {0} already registered")]
    DuplicateResource(u32),

    /// Response channel is at capacity.
    #[error("Response channel full")]
    ChannelFull,

    /// Connection closed.
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type alias using BrokerError.
pub type Result<T> = std::result::Result<T, BrokerError>;
