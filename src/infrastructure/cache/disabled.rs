//! Cache that stores nothing

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Always misses; used when caching is switched off or Redis is unreachable at startup
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCache;

#[async_trait]
impl Cache for DisabledCache {
    async fn get_raw(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Ok(None)
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool, DomainError> {
        Ok(false)
    }

    async fn delete_pattern(&self, _pattern: &str) -> Result<usize, DomainError> {
        Ok(0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
