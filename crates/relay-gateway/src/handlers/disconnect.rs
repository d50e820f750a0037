//! Disconnect handler

use super::{broadcast_user_list, HandlerResult, RouteContext};
use crate::connection::ConnectionId;

/// Handles transport closure
pub struct DisconnectHandler;

impl DisconnectHandler {
    /// Forget the connection and, if it had joined, push the new user list
    pub fn handle(ctx: &mut RouteContext<'_>, connection_id: ConnectionId) -> HandlerResult<usize> {
        let connection = ctx.connections.remove_connection(connection_id);

        let Some(username) = ctx.registry.leave(connection_id) else {
            tracing::debug!(connection_id = %connection_id, "Unjoined connection closed");
            return Ok(0);
        };

        tracing::info!(
            connection_id = %connection_id,
            username = %username,
            connected_ms = ?connection.map(|c| c.age().as_millis()),
            "{username} disconnected"
        );

        Ok(broadcast_user_list(ctx))
    }
}
