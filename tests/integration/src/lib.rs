//! Integration test utilities for the chat relay
//!
//! This crate provides helpers for running end-to-end tests against
//! a live relay over real WebSocket and HTTP connections.

pub mod helpers;
pub mod ws_client;

pub use helpers::*;
pub use ws_client::*;
