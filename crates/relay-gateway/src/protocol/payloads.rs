//! Client payload definitions
//!
//! Defines the payload structures for client-to-server events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload for `send-broadcast-message`
///
/// Fields the client left out stay `None` and are left out of the relayed
/// event; an explicit `null` is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastPayload {
    /// Message kind tag, opaque to the relay
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<Value>,

    /// Message body, opaque to the relay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl BroadcastPayload {
    /// Read a payload from raw event data
    ///
    /// Any truthy value is accepted. Non-objects carry no fields. Returns
    /// `None` for `null`, `false`, `0` and `""`.
    #[must_use]
    pub fn from_data(data: &Value) -> Option<Self> {
        if !is_truthy(data) {
            return None;
        }
        Some(Self {
            message_type: data.get("type").cloned(),
            content: data.get("content").cloned(),
        })
    }
}

/// Loose truthiness as browser clients expect it
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Payload for `typing` and `stop-typing`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingPayload {
    /// Target username; absent means everyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl TypingPayload {
    /// The target, if one was named
    ///
    /// An empty name counts as no target.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.to.as_deref().filter(|to| !to.is_empty())
    }
}

/// Payload for `private-message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateMessagePayload {
    /// Target username
    #[serde(default)]
    pub to: Option<String>,

    /// Message body, opaque to the relay
    #[serde(default)]
    pub message: Option<Value>,
}

impl PrivateMessagePayload {
    /// Username to look up, missing treated as the empty name
    #[must_use]
    pub fn recipient(&self) -> &str {
        self.to.as_deref().unwrap_or_default()
    }
}
