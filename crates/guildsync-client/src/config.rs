//! Client configuration types.

use std::num::NonZeroU32;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default upper bound on pages followed by a single paginated read
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Client-side request rate limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub requests_per_second: NonZeroU32,

    /// Requests allowed in a burst before throttling starts
    pub burst_size: NonZeroU32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitConfig {
    /// Ten requests per second with a burst of ten
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests_per_second: NonZeroU32::MIN.saturating_add(9),
            burst_size: NonZeroU32::MIN.saturating_add(9),
        }
    }

    /// Set the sustained rate
    #[must_use]
    pub const fn per_second(mut self, rate: NonZeroU32) -> Self {
        self.requests_per_second = rate;
        self
    }

    /// Set the burst size
    #[must_use]
    pub const fn burst(mut self, burst: NonZeroU32) -> Self {
        self.burst_size = burst;
        self
    }
}
