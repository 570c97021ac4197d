//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /healthz`     - Health check
//! - `/api/links*`       - Link management API
//! - `GET  /{code}`      - Short link redirect
//!
//! Static routes win over `/{code}`, and the redirect handler itself passes
//! `healthz`, `api` and `code` through without a lookup.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Route table without middleware.
///
/// Used by [`app_router`] and by tests that exercise routing without a peer address.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .route("/{code}", get(redirect_handler))
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let router = routes()
        .layer(rate_limit::layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        ))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
