//! User service - registration, login and account lookup

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::user::{
    normalize_email, Credentials, Registration, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

const USER_EXISTS: &str = "User already exists with this email";

/// Public part of an account, as embedded in other responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Account use cases
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Creates an unverified account, Validation if the email is taken
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        registration
            .validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let email = normalize_email(&registration.email)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::validation(USER_EXISTS));
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let user = User::new(&registration.name, &email, password_hash)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let user = self.repository.create(user).await.map_err(|e| match e {
            // lost a race with a concurrent registration
            DomainError::Conflict { .. } => DomainError::validation(USER_EXISTS),
            other => other,
        })?;

        info!(user = %user.id(), "New user registered");
        Ok(user)
    }

    /// Checks the password, Unauthorized on an unknown email or a mismatch
    pub async fn login(&self, credentials: &Credentials) -> Result<User, DomainError> {
        let user = self
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| DomainError::unauthorized("User not found."))?;

        if !self.hasher.verify(&credentials.password, user.password_hash()) {
            return Err(DomainError::unauthorized("Invalid credentials."));
        }

        info!(user = %user.id(), "User logged in");
        Ok(user)
    }

    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Exact match after normalization; a malformed address matches nobody
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        match normalize_email(email) {
            Ok(email) => self.repository.find_by_email(&email).await,
            Err(_) => Ok(None),
        }
    }
}
