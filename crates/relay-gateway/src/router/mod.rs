//! Session routing
//!
//! A single task owns the session registry and applies events strictly in
//! arrival order.

mod session_router;

pub use session_router::{RouterCommand, RouterHandle, SessionRouter, ROUTER_BUFFER_SIZE};
