//! Private message handler

use super::{HandlerError, HandlerResult, RouteContext};
use crate::connection::ConnectionId;
use crate::events::{timestamp_now, PrivateMessageEvent};
use crate::protocol::{PrivateMessagePayload, RelayMessage};

/// Handles `private-message` events
pub struct PrivateMessageHandler;

impl PrivateMessageHandler {
    /// Deliver a message to the connection holding the target name
    ///
    /// The sender does not need to have joined; `from` is then null. The
    /// sender never hears whether delivery happened.
    pub fn handle(
        ctx: &mut RouteContext<'_>,
        connection_id: ConnectionId,
        payload: PrivateMessagePayload,
    ) -> HandlerResult<usize> {
        let recipient = payload.recipient();
        let target_id = ctx
            .registry
            .connection_for(recipient)
            .ok_or_else(|| HandlerError::UnknownTarget(recipient.to_string()))?;

        let event = PrivateMessageEvent {
            from: ctx.registry.name_of(connection_id).map(str::to_string),
            content: payload.message,
            time: timestamp_now(),
        };

        let delivered = ctx
            .connections
            .send_to(target_id, RelayMessage::private_message(&event));

        tracing::debug!(
            connection_id = %connection_id,
            target = %target_id,
            delivered = delivered,
            "Private message relayed"
        );

        Ok(usize::from(delivered))
    }
}
