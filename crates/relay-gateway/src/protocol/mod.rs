//! Relay protocol definitions
//!
//! Defines the frame envelope and the client payload formats.

mod messages;
mod payloads;

pub use messages::RelayMessage;
pub use payloads::{BroadcastPayload, PrivateMessagePayload, TypingPayload};
