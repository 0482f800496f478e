//! Cache manager - best-effort read-through and invalidation helpers
//!
//! Every public operation swallows backend failures: reads degrade to a miss
//! and writes degrade to a no-op, each logged once at `warn`. Callers get a
//! [`CacheLookup`] or [`CacheWriteOutcome`], never a `Result`.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::domain::cache::{
    Cache, CacheKeys, CacheLookup, CacheTtl, CacheTtlPolicy, CacheWriteOutcome,
};
use crate::domain::pagination::PageRequest;
use crate::domain::property::{PropertyId, PropertyListQuery};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Wraps the injected backend with key building, TTL classes and fail-open semantics
#[derive(Debug, Clone)]
pub struct CacheManager {
    cache: Arc<dyn Cache>,
    ttl: CacheTtlPolicy,
}

impl CacheManager {
    pub fn new(cache: Arc<dyn Cache>, ttl: CacheTtlPolicy) -> Self {
        Self { cache, ttl }
    }

    pub fn backend(&self) -> &'static str {
        self.cache.backend()
    }

    /// Backend reachability, for readiness checks only
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.cache.ping().await
    }

    // Generic operations

    pub async fn get<V>(&self, key: &str) -> CacheLookup<V>
    where
        V: DeserializeOwned + Send,
    {
        match self.cache.get_raw(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(key, "Cache hit");
                    CacheLookup::Hit(value)
                }
                Err(e) => {
                    debug!(key, error = %e, "Ignoring undecodable cache entry");
                    CacheLookup::Miss
                }
            },
            Ok(None) => {
                debug!(key, "Cache miss");
                CacheLookup::Miss
            }
            Err(e) => {
                warn!(key, backend = self.backend(), error = %e, "Cache read failed");
                CacheLookup::Degraded
            }
        }
    }

    /// Stores `value` with the medium TTL
    pub async fn set<V>(&self, key: &str, value: &V) -> CacheWriteOutcome
    where
        V: Serialize + Sync,
    {
        self.set_with_ttl(key, value, CacheTtl::Medium).await
    }

    pub async fn set_with_ttl<V>(&self, key: &str, value: &V, ttl: CacheTtl) -> CacheWriteOutcome
    where
        V: Serialize + Sync,
    {
        self.set_for(key, value, self.ttl.duration(ttl)).await
    }

    pub async fn set_for<V>(&self, key: &str, value: &V, ttl: Duration) -> CacheWriteOutcome
    where
        V: Serialize + Sync,
    {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize cache value");
                return CacheWriteOutcome::Degraded;
            }
        };

        match self.cache.set_raw(key, &raw, ttl).await {
            Ok(()) => {
                debug!(key, ttl_secs = ttl.as_secs(), "Cache set");
                CacheWriteOutcome::Applied { affected: 1 }
            }
            Err(e) => {
                warn!(key, backend = self.backend(), error = %e, "Cache write failed");
                CacheWriteOutcome::Degraded
            }
        }
    }

    /// Removes one entry; an absent key is not an error
    pub async fn delete(&self, key: &str) -> CacheWriteOutcome {
        match self.cache.delete(key).await {
            Ok(removed) => CacheWriteOutcome::Applied {
                affected: usize::from(removed),
            },
            Err(e) => {
                warn!(key, backend = self.backend(), error = %e, "Cache delete failed");
                CacheWriteOutcome::Degraded
            }
        }
    }

    /// Removes every entry matching a glob pattern
    pub async fn delete_by_pattern(&self, pattern: &str) -> CacheWriteOutcome {
        match self.cache.delete_pattern(pattern).await {
            Ok(affected) => {
                debug!(pattern, affected, "Cache pattern cleared");
                CacheWriteOutcome::Applied { affected }
            }
            Err(e) => {
                warn!(pattern, backend = self.backend(), error = %e, "Cache pattern delete failed");
                CacheWriteOutcome::Degraded
            }
        }
    }

    // Property lists

    pub async fn get_property_list<V>(&self, query: &PropertyListQuery) -> CacheLookup<V>
    where
        V: DeserializeOwned + Send,
    {
        match CacheKeys::property_list(query) {
            Ok(key) => self.get(&key).await,
            Err(e) => {
                warn!(error = %e, "Cannot build property list key");
                CacheLookup::Degraded
            }
        }
    }

    pub async fn cache_property_list<V>(&self, query: &PropertyListQuery, value: &V) -> CacheWriteOutcome
    where
        V: Serialize + Sync,
    {
        match CacheKeys::property_list(query) {
            Ok(key) => self.set_with_ttl(&key, value, CacheTtl::Short).await,
            Err(e) => {
                warn!(error = %e, "Cannot build property list key");
                CacheWriteOutcome::Degraded
            }
        }
    }

    // Property details

    pub async fn get_property<V>(&self, id: &PropertyId) -> CacheLookup<V>
    where
        V: DeserializeOwned + Send,
    {
        self.get(&CacheKeys::property_detail(id)).await
    }

    pub async fn cache_property<V>(&self, id: &PropertyId, value: &V) -> CacheWriteOutcome
    where
        V: Serialize + Sync,
    {
        self.set_with_ttl(&CacheKeys::property_detail(id), value, CacheTtl::Medium)
            .await
    }

    // Favourites

    pub async fn get_user_favorites<V>(&self, user_id: &UserId, page: &PageRequest) -> CacheLookup<V>
    where
        V: DeserializeOwned + Send,
    {
        self.get(&CacheKeys::user_favorites(user_id, page)).await
    }

    pub async fn cache_user_favorites<V>(
        &self,
        user_id: &UserId,
        page: &PageRequest,
        value: &V,
    ) -> CacheWriteOutcome
    where
        V: Serialize + Sync,
    {
        self.set_with_ttl(
            &CacheKeys::user_favorites(user_id, page),
            value,
            CacheTtl::Medium,
        )
        .await
    }

    // Whole responses

    pub async fn get_route<V>(&self, path_and_query: &str) -> CacheLookup<V>
    where
        V: DeserializeOwned + Send,
    {
        self.get(&CacheKeys::route(path_and_query)).await
    }

    pub async fn cache_route<V>(&self, path_and_query: &str, value: &V, ttl: Duration) -> CacheWriteOutcome
    where
        V: Serialize + Sync,
    {
        self.set_for(&CacheKeys::route(path_and_query), value, ttl).await
    }

    // Invalidation

    /// Clears every property list and, given an id, that property's detail entry
    pub async fn invalidate_property_caches(&self, id: Option<&PropertyId>) -> CacheWriteOutcome {
        let mut outcome = self
            .delete_by_pattern(&CacheKeys::property_list_pattern())
            .await;

        if let Some(id) = id {
            outcome = outcome.and(self.delete(&CacheKeys::property_detail(id)).await);
        }

        outcome
    }

    /// Clears every cached favourites page of one user
    pub async fn invalidate_user_favorites(&self, user_id: &UserId) -> CacheWriteOutcome {
        self.delete_by_pattern(&CacheKeys::user_favorites_pattern(user_id))
            .await
    }

    /// Clears whole-response entries for property routes
    pub async fn invalidate_property_routes(&self) -> CacheWriteOutcome {
        self.delete_by_pattern(&CacheKeys::property_routes_pattern())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::property::PropertyFilter;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Listing {
        title: String,
        price: u32,
    }

    fn listing() -> Listing {
        Listing {
            title: "Sea view".to_string(),
            price: 100,
        }
    }

    fn manager(cache: Arc<MockCache>) -> CacheManager {
        CacheManager::new(cache, CacheTtlPolicy::default())
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_set_then_get_returns_stored_value() {
        let manager = manager(Arc::new(MockCache::new()));

        let outcome = manager.set("k", &listing()).await;
        assert_eq!(outcome, CacheWriteOutcome::Applied { affected: 1 });

        assert_eq!(manager.get::<Listing>("k").await, CacheLookup::Hit(listing()));
    }

    #[tokio::test]
    async fn test_missing_key_is_a_miss() {
        let manager = manager(Arc::new(MockCache::new()));
        assert_eq!(manager.get::<Listing>("absent").await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let cache = Arc::new(MockCache::new().with_raw_entry("k", "{not json"));
        let manager = manager(cache);

        assert_eq!(manager.get::<Listing>("k").await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_instead_of_erroring() {
        let cache = Arc::new(MockCache::new());
        let manager = manager(cache.clone());
        cache.fail_with("connection refused");

        assert_eq!(manager.get::<Listing>("k").await, CacheLookup::Degraded);
        assert_eq!(manager.set("k", &listing()).await, CacheWriteOutcome::Degraded);
        assert_eq!(manager.delete("k").await, CacheWriteOutcome::Degraded);
        assert_eq!(
            manager.invalidate_property_caches(None).await,
            CacheWriteOutcome::Degraded
        );

        cache.recover();
        assert!(matches!(
            manager.set("k", &listing()).await,
            CacheWriteOutcome::Applied { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_applied() {
        let manager = manager(Arc::new(MockCache::new()));
        assert_eq!(
            manager.delete("absent").await,
            CacheWriteOutcome::Applied { affected: 0 }
        );
    }

    #[tokio::test]
    async fn test_ttl_classes_per_namespace() {
        let cache = Arc::new(MockCache::new());
        let manager = manager(cache.clone());
        let id = PropertyId::new("p1").unwrap();
        let page = PageRequest::default();

        let _ = manager
            .cache_property_list(&PropertyListQuery::default(), &vec![listing()])
            .await;
        let _ = manager.cache_property(&id, &listing()).await;
        let _ = manager.cache_user_favorites(&user("u1"), &page, &vec![listing()]).await;

        let list_key = CacheKeys::property_list(&PropertyListQuery::default()).unwrap();
        assert_eq!(cache.stored_ttl(&list_key), Some(Duration::from_secs(300)));
        assert_eq!(
            cache.stored_ttl("property:detail:p1"),
            Some(Duration::from_secs(3600))
        );
        assert_eq!(
            cache.stored_ttl("user:favorites:u1:page=1:limit=10"),
            Some(Duration::from_secs(3600))
        );
    }

    #[tokio::test]
    async fn test_invalidate_property_caches_clears_lists_and_one_detail() {
        let cache = Arc::new(MockCache::new());
        let manager = manager(cache.clone());
        let p1 = PropertyId::new("p1").unwrap();
        let p2 = PropertyId::new("p2").unwrap();
        let filtered = PropertyListQuery {
            filter: PropertyFilter::new().with_city("Pune"),
            ..Default::default()
        };

        let _ = manager
            .cache_property_list(&PropertyListQuery::default(), &Vec::<Listing>::new())
            .await;
        let _ = manager.cache_property_list(&filtered, &Vec::<Listing>::new()).await;
        let _ = manager.cache_property(&p1, &listing()).await;
        let _ = manager.cache_property(&p2, &listing()).await;

        let outcome = manager.invalidate_property_caches(Some(&p1)).await;

        assert_eq!(outcome, CacheWriteOutcome::Applied { affected: 3 });
        assert_eq!(cache.keys(), vec!["property:detail:p2".to_string()]);
    }

    #[tokio::test]
    async fn test_invalidate_user_favorites_is_scoped_to_that_user() {
        let cache = Arc::new(MockCache::new());
        let manager = manager(cache.clone());

        for page in 1..=3 {
            let page = PageRequest::new(page, 10).unwrap();
            let _ = manager.cache_user_favorites(&user("u1"), &page, &1).await;
        }
        let _ = manager
            .cache_user_favorites(&user("u2"), &PageRequest::default(), &1)
            .await;

        let outcome = manager.invalidate_user_favorites(&user("u1")).await;

        assert_eq!(outcome.affected(), 3);
        assert_eq!(
            cache.keys(),
            vec!["user:favorites:u2:page=1:limit=10".to_string()]
        );
    }

    #[tokio::test]
    async fn test_route_entries() {
        let cache = Arc::new(MockCache::new());
        let manager = manager(cache.clone());

        let _ = manager
            .cache_route("/api/properties?page=1", &listing(), Duration::from_secs(30))
            .await;
        let _ = manager
            .cache_route("/api/health", &listing(), Duration::from_secs(30))
            .await;

        assert!(matches!(
            manager.get_route::<Listing>("/api/properties?page=1").await,
            CacheLookup::Hit(_)
        ));

        assert_eq!(manager.invalidate_property_routes().await.affected(), 1);
        assert_eq!(cache.keys(), vec!["cache:/api/health".to_string()]);
    }
}
