//! Favourite service - per-user cached pages, invalidated on every change

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::cache::CacheLookup;
use crate::domain::favourite::{Favourite, FavouriteId, FavouriteRepository};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::property::{Property, PropertyId, PropertyRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::cache::CacheManager;

/// A favourite joined with its property
///
/// `property` is `None` when the property was deleted after being favourited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteView {
    pub id: FavouriteId,
    pub property_id: PropertyId,
    pub created_at: DateTime<Utc>,
    pub property: Option<Property>,
}

/// Favourite use cases
#[derive(Debug)]
pub struct FavouriteService<F: FavouriteRepository, P: PropertyRepository> {
    favourites: Arc<F>,
    properties: Arc<P>,
    cache: Arc<CacheManager>,
}

fn parse_property_id(id: &str) -> Result<PropertyId, DomainError> {
    PropertyId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

impl<F: FavouriteRepository, P: PropertyRepository> FavouriteService<F, P> {
    pub fn new(favourites: Arc<F>, properties: Arc<P>, cache: Arc<CacheManager>) -> Self {
        Self {
            favourites,
            properties,
            cache,
        }
    }

    /// One page of the user's favourites, newest first
    pub async fn list(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<FavouriteView>, DomainError> {
        if let CacheLookup::Hit(cached) = self.cache.get_user_favorites(user_id, page).await {
            return Ok(cached);
        }

        let favourites = self.favourites.list_by_user(user_id, page).await?;

        let mut views = Vec::with_capacity(favourites.items.len());
        for favourite in &favourites.items {
            let property = self.properties.get(favourite.property_id()).await?;
            views.push(FavouriteView {
                id: favourite.id().clone(),
                property_id: favourite.property_id().clone(),
                created_at: favourite.created_at(),
                property,
            });
        }

        let result = Page {
            items: views,
            pagination: favourites.pagination,
        };

        let _ = self
            .cache
            .cache_user_favorites(user_id, page, &result)
            .await;

        Ok(result)
    }

    pub async fn add(&self, user_id: &UserId, property_id: &str) -> Result<Favourite, DomainError> {
        let property_id = parse_property_id(property_id)?;

        if self.properties.get(&property_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Property '{}' not found",
                property_id
            )));
        }

        if self
            .favourites
            .find_by_user_and_property(user_id, &property_id)
            .await?
            .is_some()
        {
            return Err(DomainError::validation("Property already in favourites"));
        }

        let favourite = self
            .favourites
            .create(Favourite::new(user_id.clone(), property_id))
            .await
            .map_err(|e| match e {
                // lost a race with a concurrent add
                DomainError::Conflict { .. } => {
                    DomainError::validation("Property already in favourites")
                }
                other => other,
            })?;

        info!(user = %user_id, property = %favourite.property_id(), "Added favourite");
        self.invalidate(user_id).await;

        Ok(favourite)
    }

    pub async fn remove(&self, user_id: &UserId, property_id: &str) -> Result<(), DomainError> {
        let property_id = parse_property_id(property_id)?;

        let removed = self
            .favourites
            .delete_by_user_and_property(user_id, &property_id)
            .await?;

        if removed.is_none() {
            return Err(DomainError::not_found("Favourite not found"));
        }

        info!(user = %user_id, property = %property_id, "Removed favourite");
        self.invalidate(user_id).await;

        Ok(())
    }

    /// The user's favourite for the property, if any; always read from the store
    pub async fn favourite_status(
        &self,
        user_id: &UserId,
        property_id: &str,
    ) -> Result<Option<Favourite>, DomainError> {
        let property_id = parse_property_id(property_id)?;

        self.favourites
            .find_by_user_and_property(user_id, &property_id)
            .await
    }

    async fn invalidate(&self, user_id: &UserId) {
        let outcome = self.cache.invalidate_user_favorites(user_id).await;
        debug!(user = %user_id, affected = outcome.affected(), "Invalidated favourites pages");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::{CacheTtlPolicy, MockCache};
    use crate::domain::favourite::MockFavouriteRepository;
    use crate::domain::property::{fixtures, MockPropertyRepository};
    use crate::infrastructure::favourite::StorageFavouriteRepository;
    use crate::infrastructure::property::StoragePropertyRepository;
    use crate::infrastructure::storage::InMemoryStorage;

    type Service = FavouriteService<StorageFavouriteRepository, StoragePropertyRepository>;

    fn create_service(properties: Vec<Property>) -> (Service, Arc<StoragePropertyRepository>, Arc<MockCache>) {
        let cache = Arc::new(MockCache::new());
        let manager = Arc::new(CacheManager::new(cache.clone(), CacheTtlPolicy::default()));
        let properties = Arc::new(StoragePropertyRepository::new(Arc::new(
            InMemoryStorage::with_entities(properties),
        )));
        let favourites = Arc::new(StorageFavouriteRepository::new(Arc::new(
            InMemoryStorage::<Favourite>::new(),
        )));

        (
            FavouriteService::new(favourites, properties.clone(), manager),
            properties,
            cache,
        )
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let property = fixtures::property("Flat");
        let id = property.id().to_string();
        let (service, _, _) = create_service(vec![property]);

        let added = service.add(&user("u1"), &id).await.unwrap();

        let page = service.list(&user("u1"), &PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.items[0].property.as_ref().unwrap().details().title,
            "Flat"
        );

        let status = service.favourite_status(&user("u1"), &id).await.unwrap();
        assert_eq!(status.as_ref().map(Favourite::id), Some(added.id()));
        assert!(service
            .favourite_status(&user("u2"), &id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_add_rejects_missing_property_and_duplicates() {
        let property = fixtures::property("Flat");
        let id = property.id().to_string();
        let (service, _, _) = create_service(vec![property]);

        let err = service
            .add(&user("u1"), "0b6c7a52-ffff")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        service.add(&user("u1"), &id).await.unwrap();
        let err = service.add(&user("u1"), &id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_missing_favourite() {
        let (service, _, _) = create_service(vec![]);

        let err = service.remove(&user("u1"), "0b6c7a52-ffff").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_changes_clear_only_that_users_pages() {
        let first = fixtures::property("First");
        let second = fixtures::property("Second");
        let (first_id, second_id) = (first.id().to_string(), second.id().to_string());
        let (service, _, cache) = create_service(vec![first, second]);

        service.add(&user("u1"), &first_id).await.unwrap();
        service.add(&user("u2"), &first_id).await.unwrap();

        for page in 1..=2 {
            let page = PageRequest::new(page, 1).unwrap();
            service.list(&user("u1"), &page).await.unwrap();
        }
        service.list(&user("u2"), &PageRequest::default()).await.unwrap();
        assert_eq!(cache.keys().len(), 3);

        service.add(&user("u1"), &second_id).await.unwrap();
        assert_eq!(
            cache.keys(),
            vec!["user:favorites:u2:page=1:limit=10".to_string()]
        );

        let page = service.list(&user("u1"), &PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 2);

        service.remove(&user("u1"), &first_id).await.unwrap();
        let page = service.list(&user("u1"), &PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].property_id.as_str(), second_id);
    }

    #[tokio::test]
    async fn test_deleted_property_shows_as_null() {
        let property = fixtures::property("Flat");
        let id = property.id().clone();
        let (service, properties, _) = create_service(vec![property]);

        service.add(&user("u1"), id.as_str()).await.unwrap();
        properties.delete(&id).await.unwrap();

        let page = service.list(&user("u1"), &PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].property.is_none());
    }

    #[tokio::test]
    async fn test_list_reads_through_once() {
        let mut favourites = MockFavouriteRepository::new();
        favourites
            .expect_list_by_user()
            .times(1)
            .returning(|_, page| Ok(page.paginate(Vec::new())));

        let cache = Arc::new(MockCache::new());
        let service = FavouriteService::new(
            Arc::new(favourites),
            Arc::new(MockPropertyRepository::new()),
            Arc::new(CacheManager::new(cache, CacheTtlPolicy::default())),
        );

        service.list(&user("u1"), &PageRequest::default()).await.unwrap();
        service.list(&user("u1"), &PageRequest::default()).await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_cache_still_commits_changes() {
        let property = fixtures::property("Flat");
        let id = property.id().to_string();
        let (service, _, cache) = create_service(vec![property]);
        cache.fail_with("timeout");

        service.add(&user("u1"), &id).await.unwrap();
        let page = service.list(&user("u1"), &PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);

        service.remove(&user("u1"), &id).await.unwrap();
        assert!(service
            .favourite_status(&user("u1"), &id)
            .await
            .unwrap()
            .is_none());
    }
}
