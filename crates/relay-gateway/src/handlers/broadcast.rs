//! Broadcast message handler

use super::{HandlerError, HandlerResult, RouteContext};
use crate::connection::ConnectionId;
use crate::events::{timestamp_now, ReceiveMessageEvent};
use crate::protocol::{BroadcastPayload, RelayMessage};

/// Handles `send-broadcast-message` events
pub struct BroadcastHandler;

impl BroadcastHandler {
    /// Relay a message to every connection, the sender included
    pub fn handle(
        ctx: &mut RouteContext<'_>,
        connection_id: ConnectionId,
        payload: BroadcastPayload,
    ) -> HandlerResult<usize> {
        let user = ctx
            .registry
            .joined_name(connection_id)
            .ok_or(HandlerError::NotJoined)?
            .to_string();

        let event = ReceiveMessageEvent {
            user,
            message_type: payload.message_type,
            content: payload.content,
            time: timestamp_now(),
        };

        let sent = ctx
            .connections
            .broadcast(&RelayMessage::receive_message(&event));

        tracing::debug!(
            connection_id = %connection_id,
            user = %event.user,
            sent = sent,
            "Broadcast message relayed"
        );

        Ok(sent)
    }
}
