//! Sliding-window request limiter keyed by client

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::config::RateLimitConfig;

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    pub limit: u32,
    /// Seconds until the oldest counted request leaves the window
    pub reset_in_seconds: u64,
}

/// Counts requests per client over a sliding window
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    records: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    cleanup_interval: Duration,
    last_cleanup: Arc<RwLock<Instant>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            records: Arc::new(RwLock::new(HashMap::new())),
            cleanup_interval: window.max(Duration::from_secs(60)),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.window(), config.max_requests)
    }

    /// Counts the request against `key` if it is still under the limit
    pub async fn check_and_record(&self, key: &str) -> RateLimitResult {
        self.maybe_cleanup().await;

        let now = Instant::now();
        let window_start = now.checked_sub(self.window).unwrap_or(now);

        let mut records = self.records.write().await;
        let timestamps = records.entry(key.to_string()).or_default();
        timestamps.retain(|t| *t > window_start);

        let reset_in_seconds = |oldest: Option<&Instant>| {
            oldest
                .map(|t| self.window.saturating_sub(now.duration_since(*t)))
                .unwrap_or(self.window)
                .as_secs()
        };

        if timestamps.len() as u32 >= self.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                limit: self.max_requests,
                reset_in_seconds: reset_in_seconds(timestamps.first()),
            };
        }

        timestamps.push(now);

        RateLimitResult {
            allowed: true,
            remaining: self.max_requests.saturating_sub(timestamps.len() as u32),
            limit: self.max_requests,
            reset_in_seconds: reset_in_seconds(timestamps.first()),
        }
    }

    async fn maybe_cleanup(&self) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= self.cleanup_interval
        };

        if should_cleanup {
            *self.last_cleanup.write().await = Instant::now();

            let now = Instant::now();
            let cutoff = now.checked_sub(self.window).unwrap_or(now);

            let mut records = self.records.write().await;
            for timestamps in records.values_mut() {
                timestamps.retain(|t| *t > cutoff);
            }
            records.retain(|_, v| !v.is_empty());
        }
    }
}
