//! Connection management
//!
//! Tracks open client channels and the sessions joined on them.

mod connection;
mod manager;
mod registry;

pub use connection::{Connection, ConnectionId, ConnectionState, DeliveryError};
pub use manager::ConnectionManager;
pub use registry::SessionRegistry;
