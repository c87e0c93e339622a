//! Rate Limiting for the Prediction Route
//!
//! Per-IP GCRA limiting via tower_governor. The server must be started with
//! `into_make_service_with_connect_info::<SocketAddr>()` for peer IP extraction.

use governor::middleware::StateInformationMiddleware;
use serde::Deserialize;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tracing::warn;

/// Governor config keyed by peer IP, reporting X-RateLimit-* headers
pub type PredictionGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Disable to serve predictions without limiting
    pub enabled: bool,
    /// Seconds between quota replenishments
    pub per_second: u64,
    /// Requests that may be made back to back
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 1,
            burst_size: 10,
        }
    }
}

/// Build the governor config, or `None` when limiting is off or the quota is invalid
pub fn create_governor_config(config: &RateLimitConfig) -> Option<Arc<PredictionGovernorConfig>> {
    if !config.enabled {
        return None;
    }
    let governor = GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish();
    if governor.is_none() {
        warn!(
            "Invalid rate limit quota (per_second={}, burst_size={}), limiting disabled",
            config.per_second, config.burst_size
        );
    }
    governor.map(Arc::new)
}
