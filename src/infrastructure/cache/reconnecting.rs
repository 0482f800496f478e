//! Redis backend that keeps trying to connect after a failed start

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::cache::Cache;
use crate::domain::DomainError;

use super::redis::{RedisCache, RedisCacheConfig};

/// Wraps a [`RedisCache`] that may not be connected yet
///
/// While disconnected every operation fails with a cache error, which the
/// cache manager reports as degraded. At most one connection attempt is
/// started per `retry_interval`, in the background, so requests never wait
/// on it.
#[derive(Debug, Clone)]
pub struct ReconnectingRedisCache {
    config: RedisCacheConfig,
    retry_interval: Duration,
    connected: Arc<RwLock<Option<RedisCache>>>,
    last_attempt: Arc<Mutex<Option<Instant>>>,
}

impl ReconnectingRedisCache {
    /// Starts disconnected; the first retry happens after `retry_interval`
    pub fn new(config: RedisCacheConfig, retry_interval: Duration) -> Self {
        Self {
            config,
            retry_interval,
            connected: Arc::new(RwLock::new(None)),
            last_attempt: Arc::new(Mutex::new(Some(Instant::now()))),
        }
    }

    async fn current(&self) -> Result<RedisCache, DomainError> {
        if let Some(cache) = self.connected.read().await.as_ref() {
            return Ok(cache.clone());
        }

        self.schedule_reconnect().await;
        Err(DomainError::cache("Redis is not connected"))
    }

    async fn schedule_reconnect(&self) {
        let mut last_attempt = self.last_attempt.lock().await;
        if last_attempt.is_some_and(|at| at.elapsed() < self.retry_interval) {
            return;
        }
        *last_attempt = Some(Instant::now());
        drop(last_attempt);

        let config = self.config.clone();
        let connected = self.connected.clone();
        tokio::spawn(async move {
            match RedisCache::new(config).await {
                Ok(cache) => {
                    info!("Reconnected to Redis");
                    *connected.write().await = Some(cache);
                }
                Err(e) => debug!(error = %e, "Redis still unreachable"),
            }
        });
    }
}

#[async_trait]
impl Cache for ReconnectingRedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.current().await?.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        self.current().await?.set_raw(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.current().await?.delete(key).await
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<usize, DomainError> {
        self.current().await?.delete_pattern(pattern).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.current().await?.ping().await
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable() -> RedisCacheConfig {
        RedisCacheConfig::new("redis://127.0.0.1:1")
            .with_connection_timeout(Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_disconnected_operations_fail_fast() {
        let cache = ReconnectingRedisCache::new(unreachable(), Duration::ZERO);

        let started = Instant::now();
        assert!(matches!(
            cache.get_raw("property:detail:1").await,
            Err(DomainError::Cache { .. })
        ));
        assert!(cache.set_raw("k", "1", Duration::from_secs(1)).await.is_err());
        assert!(cache.delete_pattern("properties:list:*").await.is_err());
        assert!(cache.ping().await.is_err());
        assert!(started.elapsed() < Duration::from_millis(200));

        assert_eq!(cache.backend(), "redis");
    }

    #[tokio::test]
    async fn test_attempts_are_spaced_by_retry_interval() {
        let cache = ReconnectingRedisCache::new(unreachable(), Duration::from_secs(3600));
        let first = *cache.last_attempt.lock().await;

        let _ = cache.get_raw("k").await;
        assert_eq!(*cache.last_attempt.lock().await, first);

        let cache = ReconnectingRedisCache::new(unreachable(), Duration::ZERO);
        let first = *cache.last_attempt.lock().await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let _ = cache.get_raw("k").await;
        assert_ne!(*cache.last_attempt.lock().await, first);
    }

    #[tokio::test]
    async fn test_failed_retry_stays_disconnected() {
        let cache = ReconnectingRedisCache::new(unreachable(), Duration::ZERO);

        let _ = cache.ping().await;
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(cache.connected.read().await.is_none());
        assert!(cache.get_raw("k").await.is_err());
    }
}
