//! Storage-backed property repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::property::{Property, PropertyId, PropertyListQuery, PropertyRepository};
use crate::domain::storage::Storage;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of PropertyRepository
#[derive(Debug)]
pub struct StoragePropertyRepository {
    storage: Arc<dyn Storage<Property>>,
}

impl StoragePropertyRepository {
    pub fn new(storage: Arc<dyn Storage<Property>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PropertyRepository for StoragePropertyRepository {
    async fn get(&self, id: &PropertyId) -> Result<Option<Property>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, property: Property) -> Result<Property, DomainError> {
        self.storage.create(property).await
    }

    async fn update(&self, property: Property) -> Result<Property, DomainError> {
        self.storage.update(property).await
    }

    async fn delete(&self, id: &PropertyId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn find(&self, query: &PropertyListQuery) -> Result<Page<Property>, DomainError> {
        let mut matching = self
            .storage
            .find(&|property: &Property| query.filter.matches(property))
            .await?;

        matching.sort_by(|a, b| query.compare(a, b));

        Ok(query.page.paginate(matching))
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Property>, DomainError> {
        let mut owned = self
            .storage
            .find(&|property: &Property| property.is_owned_by(owner))
            .await?;

        // Newest first
        owned.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(page.paginate(owned))
    }
}
