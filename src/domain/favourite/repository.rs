//! Favourite repository trait

use async_trait::async_trait;

use super::entity::Favourite;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::property::PropertyId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Authoritative store of favourites
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FavouriteRepository: Send + Sync {
    /// Creates a favourite, returns Conflict if the pair already exists
    async fn create(&self, favourite: Favourite) -> Result<Favourite, DomainError>;

    /// Finds the favourite linking `user_id` to `property_id`
    async fn find_by_user_and_property(
        &self,
        user_id: &UserId,
        property_id: &PropertyId,
    ) -> Result<Option<Favourite>, DomainError>;

    /// Removes the favourite linking `user_id` to `property_id`
    async fn delete_by_user_and_property(
        &self,
        user_id: &UserId,
        property_id: &PropertyId,
    ) -> Result<Option<Favourite>, DomainError>;

    /// Lists a user's favourites, newest first
    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Favourite>, DomainError>;
}
