//! Join handler

use super::{broadcast_user_list, HandlerResult, RouteContext};
use crate::connection::ConnectionId;

/// Handles `join` events
pub struct JoinHandler;

impl JoinHandler {
    /// Register the name and push the new user list to everyone
    ///
    /// No validation: empty and already-taken names are accepted.
    pub fn handle(
        ctx: &mut RouteContext<'_>,
        connection_id: ConnectionId,
        username: String,
    ) -> HandlerResult<usize> {
        let previous = ctx.registry.join(connection_id, username.clone());

        if let Some(connection) = ctx.connections.get_connection(connection_id) {
            connection.mark_joined();
        }

        tracing::info!(
            connection_id = %connection_id,
            username = %username,
            previous = ?previous,
            "{username} joined the chat"
        );

        Ok(broadcast_user_list(ctx))
    }
}
