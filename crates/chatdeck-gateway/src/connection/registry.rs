//! Session registry
//!
//! Maps connection ids to their live outbound queue and session state. Uses
//! `DashMap` so the per-socket tasks can mutate it concurrently; no entry
//! guard is ever held across an `.await`.

use dashmap::DashMap;
use tokio::sync::mpsc;

use super::{Connection, ConnectionId, Frame, Identity};

/// Every connection the listener currently knows about
pub struct SessionRegistry {
    connections: DashMap<ConnectionId, Connection>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a socket's outbound queue as an anonymous connection
    ///
    /// An existing entry under the same id is replaced.
    pub fn register(&self, id: ConnectionId, sender: mpsc::Sender<Frame>) {
        tracing::debug!(connection_id = %id, "Connection registered");
        self.connections.insert(id, Connection::new(sender));
    }

    /// Identify a connection, returning the identity it had before
    ///
    /// Unknown ids are ignored.
    pub fn attach_identity(&self, id: &ConnectionId, identity: Identity) -> Option<Identity> {
        let mut connection = self.connections.get_mut(id)?;
        tracing::debug!(
            connection_id = %id,
            user_id = %identity.user_id,
            "Connection identified"
        );
        connection.identify(identity)
    }

    /// Remove a connection, returning its identity if it had one
    ///
    /// Removing an unknown or already removed id returns `None`.
    pub fn remove(&self, id: &ConnectionId) -> Option<Identity> {
        let (_, connection) = self.connections.remove(id)?;
        tracing::debug!(
            connection_id = %id,
            connected_for_ms = connection.connected_for().as_millis(),
            "Connection removed"
        );
        connection.identity().cloned()
    }

    /// Snapshot of every connection whose queue is still open
    pub fn all_open(&self) -> Vec<(ConnectionId, mpsc::Sender<Frame>)> {
        self.connections
            .iter()
            .filter(|entry| entry.is_open())
            .map(|entry| (entry.key().clone(), entry.sender().clone()))
            .collect()
    }

    /// Outbound queue of one connection
    pub fn sender(&self, id: &ConnectionId) -> Option<mpsc::Sender<Frame>> {
        self.connections.get(id).map(|c| c.sender().clone())
    }

    pub fn identity(&self, id: &ConnectionId) -> Option<Identity> {
        self.connections.get(id).and_then(|c| c.identity().cloned())
    }

    /// Whether any registered connection is identified as this user
    pub fn has_user(&self, user_id: &str) -> bool {
        self.connections
            .iter()
            .any(|entry| entry.identity().is_some_and(|i| i.user_id == user_id))
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Drop every entry, closing all outbound queues
    pub fn clear(&self) {
        let count = self.connections.len();
        self.connections.clear();
        tracing::info!(count, "Session registry cleared");
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("connections", &self.connections.len())
            .finish()
    }
}
