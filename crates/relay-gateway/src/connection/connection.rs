//! Individual WebSocket connection
//!
//! Represents a single client channel and its lifecycle state.

use crate::protocol::RelayMessage;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Opaque handle for one client channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection ID
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Connection state
///
/// `Unjoined -> Joined -> Disconnected`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Transport open, no name announced yet
    Unjoined,
    /// A name has been announced
    Joined,
    /// Transport closed
    Disconnected,
}

/// Why a delivery to a connection was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("outbound queue full")]
    Full,
    #[error("connection closed")]
    Closed,
}

/// A single client connection
pub struct Connection {
    /// Unique connection ID
    id: ConnectionId,

    /// Current lifecycle state
    state: RwLock<ConnectionState>,

    /// Channel to the WebSocket writer task
    sender: mpsc::Sender<RelayMessage>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(id: ConnectionId, sender: mpsc::Sender<RelayMessage>) -> Arc<Self> {
        Arc::new(Self {
            id,
            state: RwLock::new(ConnectionState::Unjoined),
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the connection ID
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Mark the connection as joined
    ///
    /// No effect once disconnected.
    pub fn mark_joined(&self) {
        let mut state = self.state.write();
        if *state == ConnectionState::Unjoined {
            *state = ConnectionState::Joined;
        }
    }

    /// Mark the connection as disconnected
    pub fn mark_disconnected(&self) {
        *self.state.write() = ConnectionState::Disconnected;
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Queue a message without waiting
    ///
    /// Never blocks the caller; a full queue drops the message.
    pub fn deliver(&self, message: RelayMessage) -> Result<(), DeliveryError> {
        self.sender.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Full,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    /// Check if the writer side has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("created_at", &self.created_at)
            .finish()
    }
}
