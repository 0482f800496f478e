//! Cache domain - best-effort key/value caching in front of the store

mod key;
mod outcome;
mod pattern;
mod repository;
mod ttl;

pub use key::{CacheKeys, CacheNamespace};
pub use outcome::{CacheLookup, CacheWriteOutcome};
pub use pattern::GlobPattern;
pub use repository::Cache;
pub use ttl::{CacheTtl, CacheTtlPolicy};

#[cfg(test)]
pub use repository::mock::MockCache;
