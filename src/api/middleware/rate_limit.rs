//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a per-client-IP rate limiter.
///
/// # Limits
///
/// - **Refill**: one token every `per_second` seconds (`GovernorConfigBuilder::per_second`)
/// - **Burst**: up to `burst_size` requests at once
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Both values
/// must be non-zero; [`crate::config::Config::validate`] enforces this.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{code}", get(redirect_handler))
///     .layer(rate_limit::layer(2, 100));
/// ```
pub fn layer(
    per_second: u64,
    burst_size: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit values are validated at startup"),
    );

    GovernorLayer::new(governor_conf)
}
