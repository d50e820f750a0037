//! WebSocket handler
//!
//! Bridges one WebSocket to the session router. The socket reader forwards
//! decoded frames to the router; the writer drains the connection's
//! outbound queue.

use crate::connection::ConnectionId;
use crate::protocol::RelayMessage;
use crate::router::RouterHandle;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<RelayMessage>(state.config().gateway.outbound_buffer);

    let connection = state.connection_manager().add_connection(tx);
    let connection_id = connection.id();
    drop(connection);

    tracing::info!(connection_id = %connection_id, "New user connected");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let router = state.router().clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    if !forward_text(&router, connection_id, &text).await {
                        break;
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(connection_id = %connection_id, "Binary frame ignored");
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    tracing::trace!(connection_id = %connection_id, "Ping/pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_id, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match message.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        error = %e,
                        "Failed to encode message"
                    );
                    continue;
                }
            };

            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                tracing::debug!(
                    connection_id = %connection_id,
                    "Failed to send message to WebSocket"
                );
                break;
            }
        }

        let _ = ws_sink.close().await;
    });

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    }

    cleanup_connection(&state, connection_id).await;
}

/// Decode one text frame and hand it to the router
///
/// Returns `false` once the router has stopped.
async fn forward_text(router: &RouterHandle, connection_id: ConnectionId, text: &str) -> bool {
    let message = match RelayMessage::from_json(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                error = %e,
                "Failed to parse message"
            );
            return true;
        }
    };

    tracing::trace!(connection_id = %connection_id, event = %message.event, "Received message");

    if router.submit(connection_id, message).await.is_err() {
        tracing::warn!(connection_id = %connection_id, "Session router stopped");
        return false;
    }

    true
}

/// Clean up a connection on disconnect
async fn cleanup_connection(state: &GatewayState, connection_id: ConnectionId) {
    tracing::debug!(connection_id = %connection_id, "Cleaning up connection");

    if state.router().disconnect(connection_id).await.is_err() {
        state.connection_manager().remove_connection(connection_id);
    }
}
