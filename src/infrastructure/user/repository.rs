//! Storage-backed user repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of UserRepository
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = self.storage.find(&|u: &User| u.email() == email).await?;
        Ok(found.into_iter().next())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.find_by_email(user.email()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                user.email()
            )));
        }

        self.storage.create(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageUserRepository {
        StorageUserRepository::new(Arc::new(InMemoryStorage::<User>::new()))
    }

    fn user(name: &str, email: &str) -> User {
        User::new(name, email, "$argon2id$test").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = create_repo();
        let created = repo.create(user("Asha", "asha@example.com")).await.unwrap();

        let by_id = repo.get(created.id()).await.unwrap().unwrap();
        assert_eq!(by_id.name(), "Asha");

        let by_email = repo.find_by_email("asha@example.com").await.unwrap();
        assert_eq!(by_email.as_ref().map(User::id), Some(created.id()));

        assert!(repo.find_by_email("ravi@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_is_unique() {
        let repo = create_repo();
        repo.create(user("Asha", "asha@example.com")).await.unwrap();

        let err = repo
            .create(user("Other", "ASHA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }
}
