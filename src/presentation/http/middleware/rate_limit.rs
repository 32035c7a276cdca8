// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

use crate::config::RateLimitConfig;

pub type LoginRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-client-IP limiter: one attempt is replenished every `period`, at most `burst`
/// attempts are held. Returns `None` for a zero period or burst.
pub fn login_rate_limit_layer(config: &RateLimitConfig) -> Option<LoginRateLimitLayer> {
    let mut builder = GovernorConfigBuilder::default();
    builder.period(config.period);
    builder.burst_size(config.burst);
    let governor = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(governor))
}
