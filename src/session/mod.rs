//! Actors and session identity.
//!
//! An actor is whoever drives an edit: a player, a console, an automated
//! job. Session state outlives any single connection, so sessions are keyed
//! by a [`SessionKey`] that stays comparable after the actor disconnects.

pub mod online;

use std::sync::Arc;

use uuid::Uuid;

use crate::core::types::Result;
use crate::entity::Location;

pub use online::OnlineCache;

/// A quantity of some item granted to an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub item: String,
    pub amount: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, amount: u32) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }
}

/// Someone or something capable of driving edits.
pub trait Actor {
    /// Stable unique identifier, constant across connections.
    fn unique_id(&self) -> Uuid;

    /// Login name.
    fn name(&self) -> String;

    /// Name shown in messages; defaults to the login name.
    fn display_name(&self) -> String {
        self.name()
    }

    /// BCP 47 locale tag for message formatting.
    fn locale(&self) -> String;

    /// Whether the actor holds the given permission node.
    fn has_permission(&self, permission: &str) -> bool;

    /// Current position, if the actor is embodied in a world.
    fn location(&self) -> Option<Location>;

    /// Give the actor an item. Returns false if the actor cannot hold items.
    fn give_item(&mut self, stack: ItemStack) -> Result<bool>;

    /// Send a message to the actor.
    fn print(&self, message: &str);

    /// Key identifying this actor's session.
    fn session_key(&self) -> SessionKey;
}

/// Identity of a session, valid to hold after the actor is gone.
///
/// Two keys match when their unique ids match. `is_active` consults the
/// online cache the key was issued with, not the actor itself.
#[derive(Clone, Debug)]
pub struct SessionKey {
    id: Uuid,
    name: String,
    persistent: bool,
    online: Arc<OnlineCache>,
}

impl SessionKey {
    pub fn new(id: Uuid, name: impl Into<String>, persistent: bool, online: Arc<OnlineCache>) -> Self {
        Self {
            id,
            name: name.into(),
            persistent,
            online,
        }
    }

    pub fn unique_id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the owning actor is currently connected.
    pub fn is_active(&self) -> bool {
        self.online.contains(self.id)
    }

    /// Whether the session should survive the actor disconnecting.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SessionKey {}
