//! Property repository trait

use async_trait::async_trait;

use super::entity::{Property, PropertyId};
use super::query::PropertyListQuery;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Authoritative store of property listings
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Finds a property by ID
    async fn get(&self, id: &PropertyId) -> Result<Option<Property>, DomainError>;

    /// Creates a new property
    async fn create(&self, property: Property) -> Result<Property, DomainError>;

    /// Replaces an existing property, returns NotFound if absent
    async fn update(&self, property: Property) -> Result<Property, DomainError>;

    /// Deletes a property, returns true if it existed
    async fn delete(&self, id: &PropertyId) -> Result<bool, DomainError>;

    /// Filters, sorts and pages the full listing
    async fn find(&self, query: &PropertyListQuery) -> Result<Page<Property>, DomainError>;

    /// Lists properties created by `owner`, newest first
    async fn find_by_owner(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Property>, DomainError>;
}
