//! Session registry
//!
//! Maps connections to display names and back. Owned by the router task;
//! never shared.

use super::ConnectionId;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Two-way connection/username index
///
/// Names are not unique. A later join under a taken name takes over the
/// name lookup, and a connection that joins twice keeps a stale lookup for
/// its first name until it leaves. Leaving frees the name outright, even if
/// another connection had claimed it since.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Connection to name, in order of each connection's first join
    names: IndexMap<ConnectionId, String>,

    /// Name to the connection that most recently claimed it
    owners: HashMap<String, ConnectionId>,
}

impl SessionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `username` for `id`, overwriting either side
    ///
    /// Returns the name the connection previously held.
    pub fn join(&mut self, id: ConnectionId, username: String) -> Option<String> {
        let previous = self.names.insert(id, username.clone());
        self.owners.insert(username, id);
        previous
    }

    /// Drop the session for `id`
    ///
    /// Removes the lookup for its current name whoever holds it, plus any
    /// stale lookups left behind by earlier joins on `id`.
    pub fn leave(&mut self, id: ConnectionId) -> Option<String> {
        let name = self.names.shift_remove(&id)?;
        self.owners.remove(&name);
        self.owners.retain(|_, owner| *owner != id);
        Some(name)
    }

    /// Name recorded for a connection, empty names included
    pub fn name_of(&self, id: ConnectionId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Name of a connection that has joined under a non-empty name
    pub fn joined_name(&self, id: ConnectionId) -> Option<&str> {
        self.name_of(id).filter(|name| !name.is_empty())
    }

    /// Connection currently reachable under `username`
    pub fn connection_for(&self, username: &str) -> Option<ConnectionId> {
        self.owners.get(username).copied()
    }

    /// One name per joined connection, not deduplicated
    pub fn user_list(&self) -> Vec<String> {
        self.names.values().cloned().collect()
    }

    /// Number of joined connections
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether both directions are empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.owners.is_empty()
    }
}
