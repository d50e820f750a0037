//! Gateway server setup
//!
//! Provides the WebSocket route, the health probe and server startup.

mod handler;
mod middleware;
mod state;

pub use handler::gateway_handler;
pub use middleware::{apply_middleware, create_cors_layer, REQUEST_ID_HEADER};
pub use state::GatewayState;

use crate::connection::ConnectionManager;
use crate::router::SessionRouter;
use axum::{routing::get, Router};
use relay_common::{AppError, ConfigError, RelayConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
///
/// # Errors
/// Returns an error if the CORS origin is invalid
pub fn create_app(state: GatewayState) -> Result<Router, AppError> {
    let router = apply_middleware(create_router(), &state.config().cors)?;
    Ok(router.with_state(state))
}

/// Create the connection table and start the session router
///
/// Must be called from within a tokio runtime.
pub fn create_gateway_state(config: RelayConfig) -> GatewayState {
    let connection_manager = ConnectionManager::new_shared();
    let (router, _task) = SessionRouter::new(connection_manager.clone()).spawn();

    GatewayState::new(connection_manager, router, config)
}

/// Run the gateway server
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::bind(addr, e))?;

    tracing::info!("Gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app).await.map_err(AppError::Server)?;

    Ok(())
}

/// Run the complete gateway server with configuration
///
/// # Errors
/// Returns an error if configuration is unusable or the server fails
pub async fn run(config: RelayConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .gateway
        .address()
        .parse()
        .map_err(|_| ConfigError::InvalidValue("GATEWAY_HOST", config.gateway.host.clone()))?;

    let state = create_gateway_state(config);
    let router = state.router().clone();

    let app = create_app(state)?;
    let result = run_server(app, addr).await;

    router.shutdown().await;
    result
}
