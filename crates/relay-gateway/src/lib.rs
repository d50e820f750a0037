//! # relay-gateway
//!
//! Real-time chat relay over WebSocket. Clients join under a display name
//! and exchange broadcast messages, direct messages and typing signals.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;

pub use server::{create_app, create_gateway_state, run};
