//! User identity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    normalize_email, validate_name, validate_password, validate_user_id, UserValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// User identifier - alphanumeric, `_` and `-`, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller identity established from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id: UserId,
    email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    /// Trimmed and lowercased, unique across accounts
    email: String,
    /// Argon2 PHC string - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Builds an unverified account after validating name and email
    pub fn new(
        name: &str,
        email: &str,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = validate_name(name)?;
        let email = normalize_email(email)?;
        let now = Utc::now();

        Ok(Self {
            id: UserId::generate(),
            name,
            email,
            password_hash: password_hash.into(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Identity carried in issued tokens
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id.clone(), Some(self.email.clone()))
    }
}

impl StorageEntity for User {
    type Key = UserId;
    const COLLECTION: &'static str = "User";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Plaintext credentials as submitted by a client
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_name(&self.name)?;
        normalize_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_serde_validates() {
        let id: UserId = serde_json::from_str("\"user-1\"").unwrap();
        assert_eq!(id.as_str(), "user-1");

        let invalid: Result<UserId, _> = serde_json::from_str("\"user*\"");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_generated_ids_are_valid() {
        let id = UserId::generate();
        assert!(UserId::new(id.as_str()).is_ok());
        assert_ne!(id, UserId::generate());
    }

    #[test]
    fn test_new_user_normalizes_email() {
        let user = User::new(" Asha ", " Asha@Example.COM ", "$argon2id$hash").unwrap();

        assert_eq!(user.name(), "Asha");
        assert_eq!(user.email(), "asha@example.com");
        assert!(!user.is_verified());
        assert_eq!(user.to_authenticated().email(), Some("asha@example.com"));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new("Asha", "asha@example.com", "$argon2id$hash").unwrap();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["isVerified"], false);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_registration_validation() {
        let registration = Registration {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(registration.validate().is_ok());

        let short = Registration {
            password: "123".to_string(),
            ..registration.clone()
        };
        assert_eq!(
            short.validate(),
            Err(UserValidationError::PasswordTooShort(6))
        );

        let bad_email = Registration {
            email: "not-an-email".to_string(),
            ..registration
        };
        assert_eq!(bad_email.validate(), Err(UserValidationError::InvalidEmail));
    }
}
