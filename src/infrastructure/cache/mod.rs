//! Cache infrastructure - backends and the cache manager

mod disabled;
mod factory;
mod in_memory;
mod manager;
mod reconnecting;
mod redis;

pub use disabled::DisabledCache;
pub use factory::{CacheConfig, CacheFactory, CacheType};
pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
pub use manager::CacheManager;
pub use reconnecting::ReconnectingRedisCache;
pub use redis::{RedisCache, RedisCacheConfig};
