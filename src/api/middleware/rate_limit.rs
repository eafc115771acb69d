//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::routing::MethodRouter;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimitSettings;
use crate::state::AppState;

/// Wraps every method registered on `route` so far in a per-client token bucket.
///
/// Methods added after this call are not limited.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false`: the socket peer address (requires
///   `into_make_service_with_connect_info`)
/// - `behind_proxy = true`: `X-Forwarded-For`, `X-Real-IP` or `Forwarded`, falling
///   back to the peer address
///
/// # Errors
///
/// Returns an error if the settings describe an empty bucket.
pub fn apply(
    route: MethodRouter<AppState>,
    settings: RateLimitSettings,
    behind_proxy: bool,
) -> Result<MethodRouter<AppState>> {
    let route = if behind_proxy {
        let config = GovernorConfigBuilder::default()
            .per_second(settings.per_second)
            .burst_size(settings.burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .context("Invalid rate limit settings")?;

        route.layer(GovernorLayer::new(Arc::new(config)))
    } else {
        let config = GovernorConfigBuilder::default()
            .per_second(settings.per_second)
            .burst_size(settings.burst)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .context("Invalid rate limit settings")?;

        route.layer(GovernorLayer::new(Arc::new(config)))
    };

    Ok(route)
}
