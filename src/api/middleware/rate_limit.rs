//! Per-client rate limiting using the token bucket algorithm.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed on the socket peer address.
///
/// # Limits
///
/// - **Rate**: `per_minute` requests per minute, replenished evenly
/// - **Burst**: `per_minute` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/animal", post(animal_handler))
///     .layer(rate_limit::layer(10));
/// ```
pub fn layer(per_minute: u32) -> Layer<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor, per_minute)
}

/// Same limits as [`layer`], keyed on `X-Forwarded-For` / `X-Real-IP` /
/// `Forwarded` before falling back to the peer address.
///
/// Only use behind a trusted reverse proxy: clients can forge these headers.
pub fn proxy_layer(per_minute: u32) -> Layer<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor, per_minute)
}

/// Wraps `router` in [`layer`] or, when `behind_proxy`, [`proxy_layer`].
pub fn apply<S>(router: Router<S>, per_minute: u32, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(proxy_layer(per_minute))
    } else {
        router.layer(layer(per_minute))
    }
}

fn build<K: KeyExtractor>(extractor: K, per_minute: u32) -> Layer<K> {
    let per_minute = per_minute.max(1);
    let mut builder = GovernorConfigBuilder::default().key_extractor(extractor);

    let governor_conf = builder
        .period(replenish_period(per_minute))
        .burst_size(per_minute)
        .finish()
        .expect("rate limit period and burst are non-zero");

    GovernorLayer::new(Arc::new(governor_conf))
}

/// Time to earn back one request at `per_minute` requests per minute.
fn replenish_period(per_minute: u32) -> Duration {
    Duration::from_millis((60_000 / u64::from(per_minute)).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replenish_period() {
        assert_eq!(replenish_period(10), Duration::from_secs(6));
        assert_eq!(replenish_period(60), Duration::from_secs(1));
        assert_eq!(replenish_period(1_000_000), Duration::from_millis(1));
    }
}
