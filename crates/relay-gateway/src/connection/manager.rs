//! Connection manager
//!
//! Tracks every open client channel using DashMap for thread-safe access.
//! Membership here is transport-level: unjoined connections are included.

use super::{Connection, ConnectionId};
use crate::protocol::RelayMessage;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all open client connections
pub struct ConnectionManager {
    /// Open connections by ID
    connections: DashMap<ConnectionId, Arc<Connection>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection under a fresh ID
    pub fn add_connection(&self, sender: mpsc::Sender<RelayMessage>) -> Arc<Connection> {
        let id = ConnectionId::generate();
        let connection = Connection::new(id, sender);
        self.connections.insert(id, connection.clone());

        tracing::debug!(connection_id = %id, "Connection added");

        connection
    }

    /// Remove a connection, marking it disconnected
    pub fn remove_connection(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        let (_, connection) = self.connections.remove(&id)?;
        connection.mark_disconnected();

        tracing::debug!(connection_id = %id, "Connection removed");

        Some(connection)
    }

    /// Get a connection by ID
    pub fn get_connection(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.get(&id).map(|r| r.clone())
    }

    /// Check if a connection is open
    pub fn has_connection(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    /// Get the number of open connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Send a message to one connection
    ///
    /// Returns whether the message was queued.
    pub fn send_to(&self, id: ConnectionId, message: RelayMessage) -> bool {
        let Some(connection) = self.get_connection(id) else {
            tracing::trace!(connection_id = %id, "Send to unknown connection");
            return false;
        };

        Self::deliver(&connection, message)
    }

    /// Broadcast a message to all connections
    pub fn broadcast(&self, message: &RelayMessage) -> usize {
        self.broadcast_filtered(message, |_| true)
    }

    /// Broadcast a message to all connections except one
    pub fn broadcast_except(&self, exclude: ConnectionId, message: &RelayMessage) -> usize {
        self.broadcast_filtered(message, |id| id != exclude)
    }

    fn broadcast_filtered<F>(&self, message: &RelayMessage, include: F) -> usize
    where
        F: Fn(ConnectionId) -> bool,
    {
        // Snapshot first so no shard lock is held while delivering.
        let targets: Vec<Arc<Connection>> = self
            .connections
            .iter()
            .filter(|entry| include(*entry.key()))
            .map(|entry| entry.value().clone())
            .collect();

        let sent = targets
            .iter()
            .filter(|connection| Self::deliver(connection, message.clone()))
            .count();

        tracing::trace!(
            event = %message.event,
            sent = sent,
            "Message broadcast to connections"
        );

        sent
    }

    fn deliver(connection: &Connection, message: RelayMessage) -> bool {
        match connection.deliver(message) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    connection_id = %connection.id(),
                    error = %e,
                    "Dropped outbound message"
                );
                false
            }
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .finish()
    }
}
