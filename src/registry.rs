//! Per-endpoint bookkeeping of open resources.
//!
//! Request tasks register the handles they create here. An explicit close
//! removes a single id; a disconnect purges everything the endpoint owns in
//! one sweep.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::{BrokerError, Result};
use crate::protocol::Endpoint;

/// Identifier of one open resource (file handle).
pub type ResourceId = u32;

/// Registry of open resources keyed by owning endpoint.
///
/// A single mutex guards the whole map: `remove_all` is atomic, and
/// register/remove/remove_all for one endpoint observe a total order even
/// when issued from different tasks. Each resource is owned by exactly one
/// endpoint at a time.
#[derive(Debug, Default)]
pub struct OpenResourceRegistry {
    owners: Mutex<HashMap<ResourceId, Endpoint>>,
}

impl OpenResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            owners: Mutex::new(HashMap::new()),
        }
    }

    /// Associate a new resource with an endpoint.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateResource` if the id is already tracked, no matter
    /// which endpoint owns it.
    pub fn register(&self, endpoint: Endpoint, id: ResourceId) -> Result<()> {
        let mut owners = self.owners.lock();
        if owners.contains_key(&id) {
            return Err(BrokerError::DuplicateResource(id));
        }
        owners.insert(id, endpoint);
        Ok(())
    }

    /// Remove a single resource (explicit close path).
    ///
    /// Returns whether the id was present.
    pub fn remove(&self, id: ResourceId) -> bool {
        self.owners.lock().remove(&id).is_some()
    }

    /// Remove every resource owned by `endpoint` in one atomic sweep.
    ///
    /// Returns how many were removed. Zero is success, not failure: purging
    /// an endpoint with nothing registered, or purging the same endpoint
    /// twice, is a no-op.
    pub fn remove_all(&self, endpoint: Endpoint) -> usize {
        let mut owners = self.owners.lock();
        let before = owners.len();
        owners.retain(|_, owner| *owner != endpoint);
        before - owners.len()
    }

    /// Number of resources currently owned by `endpoint`.
    pub fn count_for(&self, endpoint: Endpoint) -> usize {
        self.owners
            .lock()
            .values()
            .filter(|owner| **owner == endpoint)
            .count()
    }

    /// Total number of tracked resources.
    pub fn len(&self) -> usize {
        self.owners.lock().len()
    }

    /// Whether the registry tracks nothing at all.
    pub fn is_empty(&self) -> bool {
        self.owners.lock().is_empty()
    }
}
