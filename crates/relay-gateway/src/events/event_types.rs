//! Relay event names
//!
//! Names carried in the `event` field of every frame, in both directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events a client may send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientEventType {
    /// Announce a display name
    #[serde(alias = "user-joined")]
    Join,
    /// Message to everyone, sender included
    #[serde(alias = "send-message")]
    SendBroadcastMessage,
    /// Started typing, to one user or everyone
    Typing,
    /// Stopped typing, to one user or everyone
    StopTyping,
    /// Direct message to one user
    PrivateMessage,
}

impl ClientEventType {
    /// Get the canonical event name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::SendBroadcastMessage => "send-broadcast-message",
            Self::Typing => "typing",
            Self::StopTyping => "stop-typing",
            Self::PrivateMessage => "private-message",
        }
    }

    /// Parse an event name, accepting the legacy aliases
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "join" | "user-joined" => Some(Self::Join),
            "send-broadcast-message" | "send-message" => Some(Self::SendBroadcastMessage),
            "typing" => Some(Self::Typing),
            "stop-typing" => Some(Self::StopTyping),
            "private-message" => Some(Self::PrivateMessage),
            _ => None,
        }
    }
}

impl fmt::Display for ClientEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events the relay emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerEventType {
    /// Full list of joined display names
    UpdateUserList,
    /// Broadcast chat message
    ReceiveMessage,
    /// Someone started typing
    UserTyping,
    /// Someone stopped typing
    UserStopTyping,
    /// Direct message delivery
    ReceivePrivateMessage,
}

impl ServerEventType {
    /// Get the event name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpdateUserList => "update-user-list",
            Self::ReceiveMessage => "receive-message",
            Self::UserTyping => "user-typing",
            Self::UserStopTyping => "user-stop-typing",
            Self::ReceivePrivateMessage => "receive-private-message",
        }
    }

    /// Parse an event name
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "update-user-list" => Some(Self::UpdateUserList),
            "receive-message" => Some(Self::ReceiveMessage),
            "user-typing" => Some(Self::UserTyping),
            "user-stop-typing" => Some(Self::UserStopTyping),
            "receive-private-message" => Some(Self::ReceivePrivateMessage),
            _ => None,
        }
    }
}

impl fmt::Display for ServerEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ServerEventType> for String {
    fn from(event: ServerEventType) -> Self {
        event.as_str().to_string()
    }
}
