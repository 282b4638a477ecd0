//! Integration tests for the connection-event dispatch layer.
//!
//! These drive the dispatcher end to end: a full command table, the real
//! tokio-backed work queue and response writer, and a broker stub exposing
//! a live resource registry.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::io::{duplex, AsyncReadExt};

use filebroker::codec::MsgPackCodec;
use filebroker::queue::BoxFuture;
use filebroker::respond::ErrorBody;
use filebroker::{
    Broker, CommandCode, ConnectionDispatcher, ConnectionEvent, DispatchTable, Endpoint,
    ErrorClass, EventSink, OpenResourceRegistry, Request, RequestTask, ResponseChannel, Result,
    TaskQueue, WorkQueue,
};

struct StubBroker {
    resources: OpenResourceRegistry,
}

impl Broker for StubBroker {
    fn open_resources(&self) -> &OpenResourceRegistry {
        &self.resources
    }
}

struct NullSink;

impl EventSink for NullSink {
    fn info(&self, _message: &str) {}
    fn severe(&self, _message: &str) {}
}

#[derive(Default)]
struct RecordingQueue {
    submitted: Mutex<Vec<&'static str>>,
}

impl WorkQueue for RecordingQueue {
    fn submit(&self, task: Box<dyn RequestTask>) {
        self.submitted.lock().push(task.name());
    }
}

#[derive(Default)]
struct RecordingResponder {
    sent: Mutex<Vec<(ErrorClass, String)>>,
}

impl ResponseChannel for RecordingResponder {
    fn send_error(&self, class: ErrorClass, message: &str) {
        self.sent.lock().push((class, message.to_string()));
    }
}

struct NamedTask {
    name: &'static str,
}

impl RequestTask for NamedTask {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// Full table: every protocol command maps to a factory producing a task
/// named after the operation.
fn standard_table() -> DispatchTable {
    let mut table = DispatchTable::new();
    for cmd in CommandCode::ALL {
        table
            .register(cmd, move |_request: Request| -> Box<dyn RequestTask> {
                Box::new(NamedTask { name: cmd.name() })
            })
            .unwrap();
    }
    table
}

fn addr(s: &str) -> Endpoint {
    s.parse().unwrap()
}

fn message(endpoint: Endpoint, command: u16) -> ConnectionEvent {
    ConnectionEvent::Message {
        endpoint,
        command,
        request_id: 1,
        payload: Bytes::from_static(b"/data/file"),
    }
}

/// Command code 2 (OPEN) enqueues exactly one open-handler task.
#[test]
fn test_open_command_enqueues_open_task() {
    let queue = Arc::new(RecordingQueue::default());
    let responder = Arc::new(RecordingResponder::default());
    let dispatcher = ConnectionDispatcher::new(
        Arc::new(standard_table()),
        queue.clone(),
        Arc::new(StubBroker {
            resources: OpenResourceRegistry::new(),
        }),
        responder.clone(),
        Arc::new(NullSink),
    );

    dispatcher.handle(message(addr("10.0.0.5:4000"), 2));

    assert_eq!(*queue.submitted.lock(), vec!["open"]);
    assert!(responder.sent.lock().is_empty());
}

/// Command code 999 produces one error reply containing "999" and no task.
#[test]
fn test_unknown_command_is_answered_directly() {
    let queue = Arc::new(RecordingQueue::default());
    let responder = Arc::new(RecordingResponder::default());
    let dispatcher = ConnectionDispatcher::new(
        Arc::new(standard_table()),
        queue.clone(),
        Arc::new(StubBroker {
            resources: OpenResourceRegistry::new(),
        }),
        responder.clone(),
        Arc::new(NullSink),
    );

    dispatcher.handle(message(addr("10.0.0.5:4000"), 999));

    assert!(queue.submitted.lock().is_empty());
    let sent = responder.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, ErrorClass::ProtocolError);
    assert!(sent[0].1.contains("999"));
}

/// A disconnect purges the departed endpoint's resources and nothing else.
#[test]
fn test_disconnect_purges_departed_endpoint() {
    let broker = Arc::new(StubBroker {
        resources: OpenResourceRegistry::new(),
    });
    let dispatcher = ConnectionDispatcher::new(
        Arc::new(standard_table()),
        Arc::new(RecordingQueue::default()),
        broker.clone(),
        Arc::new(RecordingResponder::default()),
        Arc::new(NullSink),
    );

    let gone = addr("10.0.0.5:4000");
    let kept = addr("10.0.0.6:4000");
    broker.resources.register(gone, 10).unwrap();
    broker.resources.register(gone, 11).unwrap();
    broker.resources.register(gone, 12).unwrap();
    broker.resources.register(kept, 20).unwrap();

    dispatcher.handle(ConnectionEvent::Disconnect { endpoint: gone });

    assert_eq!(broker.resources.count_for(gone), 0);
    assert_eq!(broker.resources.count_for(kept), 1);

    // Purging again is a no-op.
    dispatcher.handle(ConnectionEvent::Disconnect { endpoint: gone });
    assert_eq!(broker.resources.count_for(kept), 1);
}

/// With the real work queue, a submitted task runs and can reach the
/// broker's registry through its bound request context.
#[tokio::test]
async fn test_task_queue_executes_bound_task() {
    struct OpenTask {
        request: Request,
    }

    impl RequestTask for OpenTask {
        fn name(&self) -> &'static str {
            "open"
        }

        fn run(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
            Box::pin(async move {
                self.request
                    .broker
                    .open_resources()
                    .register(self.request.endpoint, 42)
            })
        }
    }

    let sink = Arc::new(NullSink);
    let mut table = DispatchTable::new();
    table
        .register(CommandCode::Open, |request: Request| -> Box<dyn RequestTask> {
            Box::new(OpenTask { request })
        })
        .unwrap();

    let broker = Arc::new(StubBroker {
        resources: OpenResourceRegistry::new(),
    });
    let dispatcher = ConnectionDispatcher::new(
        Arc::new(table),
        Arc::new(TaskQueue::new(16, sink.clone())),
        broker.clone(),
        Arc::new(RecordingResponder::default()),
        sink,
    );

    let ep = addr("10.0.0.5:4000");
    dispatcher.handle(message(ep, CommandCode::Open.code()));

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(broker.resources.count_for(ep), 1);

    // The race is real: a disconnect purge does not wait for in-flight
    // tasks, it just removes whatever is registered right now.
    dispatcher.handle(ConnectionEvent::Disconnect { endpoint: ep });
    assert_eq!(broker.resources.count_for(ep), 0);
}

/// With the real response writer, an unknown command surfaces as one
/// decodable error frame on the connection.
#[tokio::test]
async fn test_unknown_command_reaches_the_wire() {
    let (client, mut server) = duplex(4096);
    let (writer, _task) = filebroker::spawn_response_writer(client, 8);

    let sink = Arc::new(NullSink);
    let dispatcher = ConnectionDispatcher::new(
        Arc::new(standard_table()),
        Arc::new(TaskQueue::new(16, sink.clone())),
        Arc::new(StubBroker {
            resources: OpenResourceRegistry::new(),
        }),
        Arc::new(writer),
        sink,
    );

    dispatcher.handle(message(addr("10.0.0.5:4000"), 999));

    let len = server.read_u32().await.unwrap() as usize;
    let mut body = vec![0u8; len];
    server.read_exact(&mut body).await.unwrap();

    let decoded: ErrorBody = MsgPackCodec::decode(&body).unwrap();
    assert_eq!(decoded.code, ErrorClass::ProtocolError.code());
    assert!(decoded.message.contains("999"));
}
