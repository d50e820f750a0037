//! Relay events
//!
//! Event names and the payloads the relay emits to clients.

mod event_types;
mod payloads;

pub use event_types::{ClientEventType, ServerEventType};
pub use payloads::{timestamp_now, PrivateMessageEvent, ReceiveMessageEvent, TypingEvent};
