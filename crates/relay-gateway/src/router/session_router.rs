//! Session router
//!
//! Receives client events from connection tasks over a channel and applies
//! them one at a time against the registry it owns.

use crate::connection::{ConnectionId, ConnectionManager, SessionRegistry};
use crate::handlers::{DisconnectHandler, EventDispatcher, HandlerResult, RouteContext};
use crate::protocol::RelayMessage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Capacity of the router's inbound queue
pub const ROUTER_BUFFER_SIZE: usize = 1024;

/// Work item for the router task
#[derive(Debug, Clone)]
pub enum RouterCommand {
    /// A frame received on a connection
    Event {
        connection_id: ConnectionId,
        message: RelayMessage,
    },
    /// The connection's transport closed
    Disconnect { connection_id: ConnectionId },
    /// Stop the router loop
    Shutdown,
}

/// Cloneable sender side of the router
#[derive(Debug, Clone)]
pub struct RouterHandle {
    sender: mpsc::Sender<RouterCommand>,
}

impl RouterHandle {
    /// Queue a client event
    pub async fn submit(
        &self,
        connection_id: ConnectionId,
        message: RelayMessage,
    ) -> Result<(), mpsc::error::SendError<RouterCommand>> {
        self.sender
            .send(RouterCommand::Event {
                connection_id,
                message,
            })
            .await
    }

    /// Queue a disconnect
    pub async fn disconnect(
        &self,
        connection_id: ConnectionId,
    ) -> Result<(), mpsc::error::SendError<RouterCommand>> {
        self.sender
            .send(RouterCommand::Disconnect { connection_id })
            .await
    }

    /// Ask the router loop to stop after the commands already queued
    pub async fn shutdown(&self) {
        if self.sender.send(RouterCommand::Shutdown).await.is_err() {
            tracing::debug!("Session router already stopped");
        }
    }

    /// Check if the router loop has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Owner of the session registry
pub struct SessionRouter {
    /// Connection to name index
    registry: SessionRegistry,
    /// Open connections for fan-out
    connections: Arc<ConnectionManager>,
}

impl SessionRouter {
    /// Create a router with an empty registry
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            connections,
        }
    }

    /// Get the registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Get the connection manager
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    /// Apply one command
    ///
    /// Returns the number of deliveries queued. `Shutdown` is a no-op here.
    pub fn handle(&mut self, command: RouterCommand) -> HandlerResult<usize> {
        let mut ctx = RouteContext {
            registry: &mut self.registry,
            connections: &self.connections,
        };

        match command {
            RouterCommand::Event {
                connection_id,
                message,
            } => EventDispatcher::dispatch(&mut ctx, connection_id, &message),
            RouterCommand::Disconnect { connection_id } => {
                DisconnectHandler::handle(&mut ctx, connection_id)
            }
            RouterCommand::Shutdown => Ok(0),
        }
    }

    /// Start the router loop on the current runtime
    pub fn spawn(self) -> (RouterHandle, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(ROUTER_BUFFER_SIZE);
        let task = tokio::spawn(self.run(receiver));

        tracing::info!("Session router started");

        (RouterHandle { sender }, task)
    }

    /// Run the router loop until shutdown or until every handle is dropped
    async fn run(mut self, mut receiver: mpsc::Receiver<RouterCommand>) {
        while let Some(command) = receiver.recv().await {
            if matches!(command, RouterCommand::Shutdown) {
                break;
            }

            let connection_id = match &command {
                RouterCommand::Event { connection_id, .. }
                | RouterCommand::Disconnect { connection_id } => Some(*connection_id),
                RouterCommand::Shutdown => None,
            };

            match self.handle(command) {
                Ok(sent) => {
                    tracing::trace!(connection_id = ?connection_id, sent = sent, "Command routed");
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = ?connection_id,
                        reason = e.kind(),
                        error = %e,
                        "Event dropped"
                    );
                }
            }
        }

        tracing::info!(
            sessions = self.registry.len(),
            "Session router loop ended"
        );
    }
}

impl std::fmt::Debug for SessionRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRouter")
            .field("sessions", &self.registry.len())
            .field("connections", &self.connections)
            .finish()
    }
}
