//! Storage-backed favourite repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::favourite::{Favourite, FavouriteRepository};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::property::PropertyId;
use crate::domain::storage::Storage;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of FavouriteRepository
#[derive(Debug)]
pub struct StorageFavouriteRepository {
    storage: Arc<dyn Storage<Favourite>>,
}

impl StorageFavouriteRepository {
    pub fn new(storage: Arc<dyn Storage<Favourite>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl FavouriteRepository for StorageFavouriteRepository {
    async fn create(&self, favourite: Favourite) -> Result<Favourite, DomainError> {
        if self
            .find_by_user_and_property(favourite.user_id(), favourite.property_id())
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "Property '{}' is already a favourite of '{}'",
                favourite.property_id(),
                favourite.user_id()
            )));
        }

        self.storage.create(favourite).await
    }

    async fn find_by_user_and_property(
        &self,
        user_id: &UserId,
        property_id: &PropertyId,
    ) -> Result<Option<Favourite>, DomainError> {
        let found = self
            .storage
            .find(&|f: &Favourite| f.is_for(user_id, property_id))
            .await?;

        Ok(found.into_iter().next())
    }

    async fn delete_by_user_and_property(
        &self,
        user_id: &UserId,
        property_id: &PropertyId,
    ) -> Result<Option<Favourite>, DomainError> {
        let Some(favourite) = self.find_by_user_and_property(user_id, property_id).await? else {
            return Ok(None);
        };

        if self.storage.delete(favourite.id()).await? {
            Ok(Some(favourite))
        } else {
            Ok(None)
        }
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Favourite>, DomainError> {
        let mut favourites = self
            .storage
            .find(&|f: &Favourite| f.user_id() == user_id)
            .await?;

        favourites.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(page.paginate(favourites))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{Duration, Utc};

    fn create_repo() -> StorageFavouriteRepository {
        StorageFavouriteRepository::new(Arc::new(InMemoryStorage::<Favourite>::new()))
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_pair_is_unique() {
        let repo = create_repo();
        let property = PropertyId::generate();

        repo.create(Favourite::new(user("u1"), property.clone()))
            .await
            .unwrap();
        let err = repo
            .create(Favourite::new(user("u1"), property.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        // another user may favourite the same property
        repo.create(Favourite::new(user("u2"), property)).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_and_delete_by_pair() {
        let repo = create_repo();
        let property = PropertyId::generate();
        repo.create(Favourite::new(user("u1"), property.clone()))
            .await
            .unwrap();

        assert!(repo
            .find_by_user_and_property(&user("u1"), &property)
            .await
            .unwrap()
            .is_some());

        let removed = repo
            .delete_by_user_and_property(&user("u1"), &property)
            .await
            .unwrap();
        assert!(removed.is_some());

        let removed = repo
            .delete_by_user_and_property(&user("u1"), &property)
            .await
            .unwrap();
        assert!(removed.is_none());
    }

    #[tokio::test]
    async fn test_list_by_user_is_newest_first() {
        let repo = create_repo();
        let now = Utc::now();

        let older = Favourite::new(user("u1"), PropertyId::generate())
            .with_created_at(now - Duration::hours(1));
        let newer = Favourite::new(user("u1"), PropertyId::generate()).with_created_at(now);
        let newer_id = newer.id().clone();

        repo.create(older).await.unwrap();
        repo.create(newer).await.unwrap();
        repo.create(Favourite::new(user("u2"), PropertyId::generate()))
            .await
            .unwrap();

        let page = repo
            .list_by_user(&user("u1"), &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id(), &newer_id);
        assert_eq!(page.pagination.total, 2);
    }
}
