//! Event payload definitions
//!
//! Data carried by each event the relay emits.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Current time as an RFC 3339 UTC string with millisecond precision
#[must_use]
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `receive-message` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveMessageEvent {
    /// Display name of the sender
    pub user: String,

    /// Client-chosen message kind, relayed untouched; omitted if the client sent none
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<Value>,

    /// Message body, relayed untouched; omitted if the client sent none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Time the relay received the message
    pub time: String,
}

/// `user-typing` / `user-stop-typing` payload
///
/// `from` is set only when the signal was aimed at a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingEvent {
    /// Display name of the typist
    pub user: String,
    /// Same as `user` for a directed signal, null otherwise
    pub from: Option<String>,
}

impl TypingEvent {
    /// Signal sent to every other connection
    #[must_use]
    pub fn public(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            from: None,
        }
    }

    /// Signal sent to one target
    #[must_use]
    pub fn direct(user: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            from: Some(user.clone()),
            user,
        }
    }
}

/// `receive-private-message` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateMessageEvent {
    /// Sender's display name; omitted if the sender never joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Message body, relayed untouched; omitted if the client sent none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Time the relay received the message
    pub time: String,
}
