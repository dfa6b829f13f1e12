//! Cross-origin policy for the frontend.

use axum::http::header;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Build the CORS layer for the configured frontend origin.
///
/// The origin is matched against the request's `Origin` header; requests
/// from any other origin receive no CORS headers. Preflight `OPTIONS`
/// requests are answered directly with an empty 200.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([config.allowed_origin.clone()]))
        .allow_methods(config.allowed_methods.clone())
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
