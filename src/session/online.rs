//! Online-actor tracking.

use std::collections::HashSet;

use parking_lot::RwLock;
use uuid::Uuid;

/// Set of actors currently connected, shared across session keys.
///
/// A session key holds a reference to the cache that was current when the
/// key was issued, so `is_active` reflects later disconnects without the
/// key having to reach back to the actor.
#[derive(Debug, Default)]
pub struct OnlineCache {
    online: RwLock<HashSet<Uuid>>,
}

impl OnlineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an actor as connected.
    pub fn connect(&self, id: Uuid) {
        log::debug!("actor {id} connected");
        self.online.write().insert(id);
    }

    /// Mark an actor as disconnected.
    pub fn disconnect(&self, id: Uuid) {
        log::debug!("actor {id} disconnected");
        self.online.write().remove(&id);
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.online.read().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.online.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.online.read().is_empty()
    }
}
