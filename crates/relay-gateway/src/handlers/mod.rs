//! Event handlers
//!
//! One handler per client event kind, selected by [`EventDispatcher`].
//! Handlers run to completion without awaiting and return how many
//! deliveries they queued.

mod broadcast;
mod disconnect;
mod error;
mod join;
mod private_message;
mod typing;

pub use broadcast::BroadcastHandler;
pub use disconnect::DisconnectHandler;
pub use error::{HandlerError, HandlerResult};
pub use join::JoinHandler;
pub use private_message::PrivateMessageHandler;
pub use typing::TypingHandler;

use crate::connection::{ConnectionId, ConnectionManager, SessionRegistry};
use crate::events::ClientEventType;
use crate::protocol::RelayMessage;

/// State a handler may touch
pub struct RouteContext<'a> {
    /// Session registry, exclusively borrowed
    pub registry: &'a mut SessionRegistry,
    /// Open connections for fan-out
    pub connections: &'a ConnectionManager,
}

/// Dispatch incoming client events to the matching handler
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle one client event
    pub fn dispatch(
        ctx: &mut RouteContext<'_>,
        connection_id: ConnectionId,
        message: &RelayMessage,
    ) -> HandlerResult<usize> {
        let Some(event) = message.client_event_type() else {
            return Err(HandlerError::UnknownEvent(message.event.clone()));
        };

        let invalid = || HandlerError::InvalidPayload(event.to_string());

        match event {
            ClientEventType::Join => {
                let username = message.as_join().ok_or_else(invalid)?;
                JoinHandler::handle(ctx, connection_id, username)
            }
            ClientEventType::SendBroadcastMessage => {
                let payload = message.as_broadcast().ok_or_else(invalid)?;
                BroadcastHandler::handle(ctx, connection_id, payload)
            }
            ClientEventType::Typing => {
                let payload = message.as_typing().ok_or_else(invalid)?;
                TypingHandler::handle(ctx, connection_id, payload, true)
            }
            ClientEventType::StopTyping => {
                let payload = message.as_typing().ok_or_else(invalid)?;
                TypingHandler::handle(ctx, connection_id, payload, false)
            }
            ClientEventType::PrivateMessage => {
                let payload = message.as_private_message().ok_or_else(invalid)?;
                PrivateMessageHandler::handle(ctx, connection_id, payload)
            }
        }
    }
}

/// Send the current user list to every connection
fn broadcast_user_list(ctx: &RouteContext<'_>) -> usize {
    let message = RelayMessage::user_list(ctx.registry.user_list());
    ctx.connections.broadcast(&message)
}
