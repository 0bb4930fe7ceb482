//! Request throttling for the summary API
//!
//! The public summary endpoint has an informal rate limit, so the fetcher
//! waits a fixed delay after every request regardless of how long the
//! request took. There is no adaptive backoff.

use std::time::Duration;
use tokio::time::sleep;

use crate::config::ThrottleConfig;

/// Fixed inter-request delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestThrottle {
    delay: Duration,
}

impl RequestThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Throttle that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspend for the configured delay
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

impl From<&ThrottleConfig> for RequestThrottle {
    fn from(config: &ThrottleConfig) -> Self {
        Self::new(Duration::from_millis(config.request_delay_ms))
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::from(&ThrottleConfig::default())
    }
}
