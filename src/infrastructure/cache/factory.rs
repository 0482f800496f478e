//! Cache factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::cache::Cache;
use crate::domain::DomainError;

use super::disabled::DisabledCache;
use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::reconnecting::ReconnectingRedisCache;
use super::redis::{RedisCache, RedisCacheConfig};

/// Supported cache backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheType {
    #[default]
    InMemory,
    Redis,
    Disabled,
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::InMemory => write!(f, "in_memory"),
            CacheType::Redis => write!(f, "redis"),
            CacheType::Disabled => write!(f, "disabled"),
        }
    }
}

impl std::str::FromStr for CacheType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(CacheType::InMemory),
            "redis" => Ok(CacheType::Redis),
            "disabled" | "none" | "off" => Ok(CacheType::Disabled),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache type: {}. Valid types: in_memory, redis, disabled",
                s
            ))),
        }
    }
}

/// Everything needed to build a backend
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub cache_type: CacheType,
    /// Required for Redis
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
    /// In-memory only
    pub max_capacity: u64,
    /// In-memory only; no entry outlives this
    pub max_ttl: Duration,
    pub connection_timeout: Duration,
    pub command_timeout: Duration,
    /// Redis only; minimum delay between reconnection attempts
    pub reconnect_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::InMemory,
            redis_url: None,
            key_prefix: None,
            max_capacity: 10_000,
            max_ttl: Duration::from_secs(86_400),
            connection_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_secs(2),
            reconnect_interval: Duration::from_secs(30),
        }
    }
}

impl CacheConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            cache_type: CacheType::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            cache_type: CacheType::Disabled,
            ..Default::default()
        }
    }
}

/// Builds the configured backend
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates the configured backend, failing if it cannot be reached
    pub async fn create(&self, config: &CacheConfig) -> Result<Arc<dyn Cache>, DomainError> {
        match config.cache_type {
            CacheType::InMemory => {
                let cache = InMemoryCache::with_config(
                    InMemoryCacheConfig::default()
                        .with_max_capacity(config.max_capacity)
                        .with_max_ttl(config.max_ttl),
                );
                Ok(Arc::new(cache))
            }
            CacheType::Redis => Ok(Arc::new(RedisCache::new(redis_config(config)?).await?)),
            CacheType::Disabled => Ok(Arc::new(DisabledCache)),
        }
    }

    /// Like [`create`](Self::create), but never fails
    ///
    /// An unreachable Redis yields a [`ReconnectingRedisCache`] that serves
    /// every request as degraded until a background retry succeeds. Any other
    /// error yields a [`DisabledCache`].
    pub async fn create_or_fallback(&self, config: &CacheConfig) -> Arc<dyn Cache> {
        match self.create(config).await {
            Ok(cache) => {
                info!(backend = cache.backend(), "Cache backend ready");
                cache
            }
            Err(e @ DomainError::Cache { .. }) if config.cache_type == CacheType::Redis => {
                warn!(
                    error = %e,
                    retry_secs = config.reconnect_interval.as_secs(),
                    "Redis unavailable, serving from the store until it reconnects"
                );
                match redis_config(config) {
                    Ok(redis_config) => Arc::new(ReconnectingRedisCache::new(
                        redis_config,
                        config.reconnect_interval,
                    )),
                    Err(_) => Arc::new(DisabledCache),
                }
            }
            Err(e) => {
                error!(
                    backend = %config.cache_type,
                    error = %e,
                    "Cache backend unavailable, continuing without cache"
                );
                Arc::new(DisabledCache)
            }
        }
    }
}

fn redis_config(config: &CacheConfig) -> Result<RedisCacheConfig, DomainError> {
    let url = config.redis_url.clone().ok_or_else(|| {
        DomainError::configuration("Redis URL is required for Redis cache type")
    })?;

    let mut redis_config = RedisCacheConfig::new(url)
        .with_connection_timeout(config.connection_timeout)
        .with_command_timeout(config.command_timeout);

    if let Some(prefix) = &config.key_prefix {
        redis_config = redis_config.with_key_prefix(prefix.clone());
    }

    Ok(redis_config)
}
