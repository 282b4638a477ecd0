//! Observability sink for dispatch-layer records.
//!
//! The dispatcher reports through an injected [`EventSink`] instead of a
//! process-global logger, so embedders decide where records go.
//! [`TracingSink`] is the default and forwards to the `tracing` subscriber.

/// Append-only record emission with two severities.
pub trait EventSink: Send + Sync {
    /// Record an informational event.
    fn info(&self, message: &str);

    /// Record a severe event.
    fn severe(&self, message: &str);
}

/// Sink that forwards records to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn severe(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
