// HTTP middleware

use crate::config::PerformanceConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// The front-end may be served from another origin during development.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Gzip for JSON and static assets. The default predicate never compresses
/// `text/event-stream`, so rewrite frames are flushed as they are produced.
pub fn compression_layer(config: &PerformanceConfig) -> CompressionLayer {
    CompressionLayer::new().gzip(config.enable_compression)
}
