//! Axum-based HTTP server implementation for rewrite-relay.
//!
//! This module sets up the HTTP server, configures routes and middleware, and
//! serves the single-page front-end for every non-API path.
//!
//! # Components
//!
//! - `handlers`: Individual endpoints (rewrite stream, translation, health).
//! - `middleware`: Request ID, CORS and compression layers.
//! - `routes`: The router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus, TranslateResult};
pub use routes::{create_router, AppState};
