//! Document store trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Predicate used to scan a collection
pub type Predicate<'a, E> = &'a (dyn Fn(&E) -> bool + Send + Sync);

/// Authoritative CRUD store for one collection
///
/// Every cache miss ends up here, so implementations must not depend on the cache.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Returns every document matching `predicate`, in no particular order
    async fn find(&self, predicate: Predicate<'_, E>) -> Result<Vec<E>, DomainError>;

    /// Inserts a document, Conflict if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Replaces a document, NotFound if the key is unknown
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Returns true if a document was removed
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;
}
