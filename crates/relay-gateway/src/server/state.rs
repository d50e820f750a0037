//! Gateway state
//!
//! Application state shared by every request handler.

use crate::connection::ConnectionManager;
use crate::router::RouterHandle;
use relay_common::RelayConfig;
use std::sync::Arc;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Open client connections
    connection_manager: Arc<ConnectionManager>,
    /// Sender side of the session router
    router: RouterHandle,
    /// Application configuration
    config: Arc<RelayConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        router: RouterHandle,
        config: RelayConfig,
    ) -> Self {
        Self {
            connection_manager,
            router,
            config: Arc::new(config),
        }
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the session router handle
    pub fn router(&self) -> &RouterHandle {
        &self.router
    }

    /// Get the application configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .field("router", &self.router)
            .field("app", &self.config.app.name)
            .finish()
    }
}
