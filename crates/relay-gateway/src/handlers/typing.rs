//! Typing indicator handler

use super::{HandlerError, HandlerResult, RouteContext};
use crate::connection::ConnectionId;
use crate::events::TypingEvent;
use crate::protocol::{RelayMessage, TypingPayload};

/// Handles `typing` and `stop-typing` events
pub struct TypingHandler;

impl TypingHandler {
    /// Route a typing signal
    ///
    /// With a target, only that user hears it and an unknown target drops
    /// the signal. Without one, everyone but the sender hears it.
    pub fn handle(
        ctx: &mut RouteContext<'_>,
        connection_id: ConnectionId,
        payload: TypingPayload,
        started: bool,
    ) -> HandlerResult<usize> {
        let user = ctx
            .registry
            .joined_name(connection_id)
            .ok_or(HandlerError::NotJoined)?
            .to_string();

        match payload.target() {
            Some(target) => {
                let target_id = ctx
                    .registry
                    .connection_for(target)
                    .ok_or_else(|| HandlerError::UnknownTarget(target.to_string()))?;

                let message = RelayMessage::typing(started, &TypingEvent::direct(user));
                Ok(usize::from(ctx.connections.send_to(target_id, message)))
            }
            None => {
                let message = RelayMessage::typing(started, &TypingEvent::public(user));
                Ok(ctx.connections.broadcast_except(connection_id, &message))
            }
        }
    }
}
