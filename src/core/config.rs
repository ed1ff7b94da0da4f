//! Client and polling configuration.

use std::time::Duration;

/// Client-side request throttling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

/// Configuration shared by every request an [`crate::SmdClient`] issues.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Throttle requests; `None` disables rate limiting.
    pub rate_limit: Option<RateLimitConfig>,
    /// Per-request timeout; `None` leaves requests unbounded and relies on
    /// the polling budget to bound total wall-clock time.
    pub request_timeout: Option<Duration>,
    /// Minimum zxcvbn strength required of endpoint passwords.
    pub password_min_score: Option<zxcvbn::Score>,
}

/// Attempt budget for discovery polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_INTERVAL)
    }
}
