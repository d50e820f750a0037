//! HTTP middleware stack
//!
//! Request IDs, request tracing and the single-origin CORS policy.

use super::GatewayState;
use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    Router,
};
use relay_common::{ConfigError, CorsConfig};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Apply the middleware stack to the router
///
/// # Errors
/// Returns an error if the configured origin is not a valid header value
pub fn apply_middleware(
    router: Router<GatewayState>,
    cors_config: &CorsConfig,
) -> Result<Router<GatewayState>, ConfigError> {
    let cors = create_cors_layer(cors_config)?;

    Ok(router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(
                header::HeaderName::from_static(REQUEST_ID_HEADER),
                MakeRequestUuid,
            ))
            .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
                REQUEST_ID_HEADER,
            )))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("unknown");

                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    })
                    .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                    .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
            )
            .layer(cors),
    ))
}

/// Create the CORS layer
///
/// Exactly one origin, GET and POST only, credentials allowed.
pub fn create_cors_layer(config: &CorsConfig) -> Result<CorsLayer, ConfigError> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidValue("CORS_ALLOWED_ORIGIN", config.allowed_origin.clone()))?;

    tracing::info!(origin = %config.allowed_origin, "CORS: Allowing single origin");

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .allow_credentials(true))
}
