//! Command dispatch table.
//!
//! Maps command codes to handler factories. The table is built once at
//! startup by registering one entry per command; afterwards lookup is
//! read-only, so a single table is shared across every connection without
//! locking. Adding a command means registering an entry, not editing
//! dispatch logic.

use std::collections::HashMap;

use crate::error::{BrokerError, Result};
use crate::protocol::CommandCode;
use crate::queue::{Request, RequestTask};

/// Builds the request task for one command.
///
/// A factory is consulted once per inbound message carrying its command
/// code and must produce a fresh task bound to that request.
pub trait HandlerFactory: Send + Sync {
    /// Construct the task bound to `request`.
    fn make(&self, request: Request) -> Box<dyn RequestTask>;
}

impl<F> HandlerFactory for F
where
    F: Fn(Request) -> Box<dyn RequestTask> + Send + Sync,
{
    fn make(&self, request: Request) -> Box<dyn RequestTask> {
        (self)(request)
    }
}

/// Registry mapping command codes to handler factories.
///
/// Unknown codes resolve to `None`. That is an expected outcome - the
/// dispatcher answers it with a protocol error - not a fault of the table.
#[derive(Default)]
pub struct DispatchTable {
    factories: HashMap<u16, Box<dyn HandlerFactory>>,
}

impl DispatchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register the factory for one command.
    ///
    /// # Errors
    ///
    /// Each command maps to at most one factory; registering a code twice
    /// returns `DuplicateCommand`.
    pub fn register<H>(&mut self, command: CommandCode, factory: H) -> Result<()>
    where
        H: HandlerFactory + 'static,
    {
        let code = command.code();
        if self.factories.contains_key(&code) {
            return Err(BrokerError::DuplicateCommand(code));
        }
        self.factories.insert(code, Box::new(factory));
        Ok(())
    }

    /// Look up the factory for a raw command code.
    pub fn resolve(&self, code: u16) -> Option<&dyn HandlerFactory> {
        self.factories.get(&code).map(|f| f.as_ref())
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
