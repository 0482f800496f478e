//! Property service - read-through caching and invalidate-on-write

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::cache::CacheLookup;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::property::{
    Property, PropertyDetails, PropertyId, PropertyListQuery, PropertyRepository, PropertyUpdate,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::cache::CacheManager;

/// Property use cases
///
/// The repository is authoritative. Lists and details are served from the
/// cache when possible; every committed write clears all cached lists and
/// the written property's detail entry.
#[derive(Debug)]
pub struct PropertyService<R: PropertyRepository> {
    repository: Arc<R>,
    cache: Arc<CacheManager>,
}

fn parse_id(id: &str) -> Result<PropertyId, DomainError> {
    PropertyId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

impl<R: PropertyRepository> PropertyService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<CacheManager>) -> Self {
        Self { repository, cache }
    }

    /// Filtered, sorted, paged listing
    pub async fn list(&self, query: &PropertyListQuery) -> Result<Page<Property>, DomainError> {
        if let CacheLookup::Hit(page) = self.cache.get_property_list(query).await {
            return Ok(page);
        }

        let page = self.repository.find(query).await?;
        let _ = self.cache.cache_property_list(query, &page).await;

        Ok(page)
    }

    pub async fn get(&self, id: &str) -> Result<Property, DomainError> {
        let id = parse_id(id)?;

        if let CacheLookup::Hit(property) = self.cache.get_property(&id).await {
            return Ok(property);
        }

        let property = self
            .repository
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Property '{}' not found", id)))?;

        let _ = self.cache.cache_property(&id, &property).await;

        Ok(property)
    }

    /// Properties created by `owner`; always read from the store
    pub async fn list_by_owner(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Property>, DomainError> {
        self.repository.find_by_owner(owner, page).await
    }

    pub async fn create(
        &self,
        owner: &UserId,
        details: PropertyDetails,
    ) -> Result<Property, DomainError> {
        let property = Property::new(details, owner.clone())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let property = self.repository.create(property).await?;
        info!(id = %property.id(), owner = %owner, "Created property");

        let outcome = self.cache.invalidate_property_caches(None).await;
        debug!(affected = outcome.affected(), "Invalidated property lists");

        Ok(property)
    }

    pub async fn update(
        &self,
        id: &str,
        user: &UserId,
        update: PropertyUpdate,
    ) -> Result<Property, DomainError> {
        let mut property = self.owned_property(id, user).await?;

        property
            .apply(update)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let property = self.repository.update(property).await?;
        info!(id = %property.id(), "Updated property");

        let outcome = self
            .cache
            .invalidate_property_caches(Some(property.id()))
            .await;
        debug!(affected = outcome.affected(), "Invalidated property caches");

        Ok(property)
    }

    pub async fn delete(&self, id: &str, user: &UserId) -> Result<(), DomainError> {
        let property = self.owned_property(id, user).await?;

        if !self.repository.delete(property.id()).await? {
            return Err(DomainError::not_found(format!(
                "Property '{}' not found",
                property.id()
            )));
        }
        info!(id = %property.id(), "Deleted property");

        let outcome = self
            .cache
            .invalidate_property_caches(Some(property.id()))
            .await;
        debug!(affected = outcome.affected(), "Invalidated property caches");

        Ok(())
    }

    /// Loads a property from the store and checks `user` owns it
    async fn owned_property(&self, id: &str, user: &UserId) -> Result<Property, DomainError> {
        let id = parse_id(id)?;

        let property = self
            .repository
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Property '{}' not found", id)))?;

        if !property.is_owned_by(user) {
            return Err(DomainError::forbidden(
                "Only the property owner can modify this listing",
            ));
        }

        Ok(property)
    }
}
