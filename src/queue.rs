//! Request tasks and the work-queue seam.
//!
//! The dispatcher converts each recognized message into a [`RequestTask`]
//! and hands it to a [`WorkQueue`]. Submission is fire-and-forget: the
//! dispatcher never waits for, nor learns the outcome of, task execution.
//!
//! [`TaskQueue`] is the built-in executor-backed queue: one spawned tokio
//! task per request, gated by a semaphore so a flood of requests cannot
//! exhaust the runtime. When the limit is reached new requests are shed
//! with a severe record instead of queueing, which keeps `submit`
//! non-blocking for the dispatcher.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Semaphore;

use crate::broker::Broker;
use crate::error::Result;
use crate::protocol::Endpoint;
use crate::respond::ResponseChannel;
use crate::sink::EventSink;

/// Default maximum concurrently running request tasks.
pub const DEFAULT_MAX_CONCURRENT_TASKS: usize = 256;

/// Boxed future for task results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Everything a request task is bound to at construction time.
pub struct Request {
    /// Originating peer.
    pub endpoint: Endpoint,
    /// Raw command code from the message event.
    pub command: u16,
    /// Correlation id for replies.
    pub request_id: u32,
    /// Opaque request payload.
    pub payload: Bytes,
    /// Channel for answering on the originating connection.
    pub responder: Arc<dyn ResponseChannel>,
    /// Broker context, including the open-resource registry.
    pub broker: Arc<dyn Broker>,
}

/// A unit of work constructed for one recognized command.
pub trait RequestTask: Send + 'static {
    /// Operation name, used in log records.
    fn name(&self) -> &'static str;

    /// Execute the task. Runs on the work queue, never on the dispatcher.
    fn run(self: Box<Self>) -> BoxFuture<'static, Result<()>>;
}

/// Asynchronous executor for request tasks.
///
/// Implementations own their scheduling and backpressure policy. `submit`
/// must not block: the dispatcher calls it inline while the transport is
/// delivering events.
pub trait WorkQueue: Send + Sync {
    /// Queue a task for execution. Fire-and-forget.
    fn submit(&self, task: Box<dyn RequestTask>);
}

/// Work queue that spawns one tokio task per request.
pub struct TaskQueue {
    permits: Arc<Semaphore>,
    sink: Arc<dyn EventSink>,
}

impl TaskQueue {
    /// Create a queue allowing up to `max_concurrent` tasks in flight.
    pub fn new(max_concurrent: usize, sink: Arc<dyn EventSink>) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
            sink,
        }
    }

    /// Create a queue with the default concurrency limit.
    pub fn with_default_limit(sink: Arc<dyn EventSink>) -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT_TASKS, sink)
    }
}

impl WorkQueue for TaskQueue {
    fn submit(&self, task: Box<dyn RequestTask>) {
        let permit = match self.permits.clone().try_acquire_owned() {
            Ok(p) => p,
            Err(_) => {
                self.sink.severe(&format!(
                    "Task capacity reached, dropping {} request",
                    task.name()
                ));
                return;
            }
        };

        let sink = self.sink.clone();
        tokio::spawn(async move {
            // Permit is held until the task completes.
            let _permit = permit;
            let name = task.name();
            if let Err(e) = task.run().await {
                sink.severe(&format!("Request task {} failed: {}", name, e));
            }
        });
    }
}
