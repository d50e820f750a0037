//! Relay message format
//!
//! Every WebSocket text frame, in either direction, is one `RelayMessage`.

use super::{BroadcastPayload, PrivateMessagePayload, TypingPayload};
use crate::events::{
    ClientEventType, PrivateMessageEvent, ReceiveMessageEvent, ServerEventType, TypingEvent,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relay message format
///
/// ```json
/// {"event": "private-message", "data": {"to": "bob", "message": "hi"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayMessage {
    /// Event name
    pub event: String,

    /// Event payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl RelayMessage {
    /// Create a message with an arbitrary event name
    #[must_use]
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    // === Server Messages ===

    /// Create a server event from any serializable payload
    #[must_use]
    pub fn emit(event: ServerEventType, payload: &impl Serialize) -> Self {
        Self::new(event, serde_json::to_value(payload).unwrap_or_default())
    }

    /// Create an `update-user-list` message
    #[must_use]
    pub fn user_list(names: Vec<String>) -> Self {
        Self::new(
            ServerEventType::UpdateUserList,
            Value::Array(names.into_iter().map(Value::String).collect()),
        )
    }

    /// Create a `receive-message` message
    #[must_use]
    pub fn receive_message(event: &ReceiveMessageEvent) -> Self {
        Self::emit(ServerEventType::ReceiveMessage, event)
    }

    /// Create a `user-typing` or `user-stop-typing` message
    #[must_use]
    pub fn typing(started: bool, event: &TypingEvent) -> Self {
        let kind = if started {
            ServerEventType::UserTyping
        } else {
            ServerEventType::UserStopTyping
        };
        Self::emit(kind, event)
    }

    /// Create a `receive-private-message` message
    #[must_use]
    pub fn private_message(event: &PrivateMessageEvent) -> Self {
        Self::emit(ServerEventType::ReceivePrivateMessage, event)
    }

    // === Parsing Client Messages ===

    /// Resolve the event name to a client event, if it is one
    #[must_use]
    pub fn client_event_type(&self) -> Option<ClientEventType> {
        ClientEventType::from_str(&self.event)
    }

    /// Resolve the event name to a server event, if it is one
    #[must_use]
    pub fn server_event_type(&self) -> Option<ServerEventType> {
        ServerEventType::from_str(&self.event)
    }

    /// Try to parse as a join username
    ///
    /// A null or missing name registers as the empty name.
    pub fn as_join(&self) -> Option<String> {
        if self.client_event_type() != Some(ClientEventType::Join) {
            return None;
        }
        match &self.data {
            Value::String(name) => Some(name.clone()),
            Value::Null => Some(String::new()),
            _ => None,
        }
    }

    /// Try to parse as a broadcast payload
    pub fn as_broadcast(&self) -> Option<BroadcastPayload> {
        if self.client_event_type() != Some(ClientEventType::SendBroadcastMessage) {
            return None;
        }
        BroadcastPayload::from_data(&self.data)
    }

    /// Try to parse as a typing or stop-typing payload
    pub fn as_typing(&self) -> Option<TypingPayload> {
        if !matches!(
            self.client_event_type(),
            Some(ClientEventType::Typing | ClientEventType::StopTyping)
        ) {
            return None;
        }
        serde_json::from_value(self.data.clone()).ok()
    }

    /// Try to parse as a private message payload
    pub fn as_private_message(&self) -> Option<PrivateMessagePayload> {
        if self.client_event_type() != Some(ClientEventType::PrivateMessage) {
            return None;
        }
        serde_json::from_value(self.data.clone()).ok()
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for RelayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RelayMessage(event={})", self.event)
    }
}
