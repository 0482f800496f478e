//! Recommendation entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::property::PropertyId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

const MAX_MESSAGE_LENGTH: usize = 500;
const MAX_ID_LENGTH: usize = 64;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendationError {
    #[error("Message cannot exceed {0} characters")]
    MessageTooLong(usize),

    #[error("Invalid recommendation ID: '{0}'")]
    InvalidId(String),
}

/// Recommendation identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecommendationId(String);

impl RecommendationId {
    /// Alphanumerics and `-`, as produced by [`generate`](Self::generate)
    pub fn new(id: impl Into<String>) -> Result<Self, RecommendationError> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= MAX_ID_LENGTH
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

        if valid {
            Ok(Self(id))
        } else {
            Err(RecommendationError::InvalidId(id))
        }
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecommendationId {
    type Error = RecommendationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecommendationId> for String {
    fn from(id: RecommendationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for RecommendationId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A property sent from one user to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    id: RecommendationId,
    property_id: PropertyId,
    recommended_by: UserId,
    recommended_to: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    is_read: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Recommendation {
    /// Trims the message; a blank message is dropped
    pub fn new(
        property_id: PropertyId,
        recommended_by: UserId,
        recommended_to: UserId,
        message: Option<&str>,
    ) -> Result<Self, RecommendationError> {
        let message = message.map(str::trim).filter(|m| !m.is_empty());
        if message.is_some_and(|m| m.chars().count() > MAX_MESSAGE_LENGTH) {
            return Err(RecommendationError::MessageTooLong(MAX_MESSAGE_LENGTH));
        }

        let now = Utc::now();
        Ok(Self {
            id: RecommendationId::generate(),
            property_id,
            recommended_by,
            recommended_to,
            message: message.map(str::to_string),
            is_read: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &RecommendationId {
        &self.id
    }

    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    pub fn recommended_by(&self) -> &UserId {
        &self.recommended_by
    }

    pub fn recommended_to(&self) -> &UserId {
        &self.recommended_to
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn mark_read(&mut self) {
        if !self.is_read {
            self.is_read = true;
            self.updated_at = Utc::now();
        }
    }

    /// Same property from the same sender to the same recipient
    pub fn duplicates(&self, other: &Recommendation) -> bool {
        self.property_id == other.property_id
            && self.recommended_by == other.recommended_by
            && self.recommended_to == other.recommended_to
    }

    pub fn involves(&self, user: &UserId) -> bool {
        &self.recommended_by == user || &self.recommended_to == user
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

impl StorageEntity for Recommendation {
    type Key = RecommendationId;
    const COLLECTION: &'static str = "Recommendation";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_message_is_trimmed_and_bounded() {
        let property = PropertyId::generate();

        let rec = Recommendation::new(property.clone(), user("a"), user("b"), Some("  look  "))
            .unwrap();
        assert_eq!(rec.message(), Some("look"));
        assert!(!rec.is_read());

        let rec = Recommendation::new(property.clone(), user("a"), user("b"), Some("   ")).unwrap();
        assert_eq!(rec.message(), None);

        let long = "x".repeat(501);
        assert_eq!(
            Recommendation::new(property, user("a"), user("b"), Some(&long)),
            Err(RecommendationError::MessageTooLong(500))
        );
    }

    #[test]
    fn test_duplicates_and_participants() {
        let property = PropertyId::generate();
        let first = Recommendation::new(property.clone(), user("a"), user("b"), None).unwrap();
        let again = Recommendation::new(property.clone(), user("a"), user("b"), Some("hi")).unwrap();
        let reverse = Recommendation::new(property, user("b"), user("a"), None).unwrap();

        assert!(first.duplicates(&again));
        assert!(!first.duplicates(&reverse));
        assert!(first.involves(&user("a")));
        assert!(first.involves(&user("b")));
        assert!(!first.involves(&user("c")));
    }

    #[test]
    fn test_mark_read() {
        let mut rec =
            Recommendation::new(PropertyId::generate(), user("a"), user("b"), None).unwrap();
        rec.mark_read();
        assert!(rec.is_read());
        assert!(rec.updated_at() >= rec.created_at());
    }

    #[test]
    fn test_id_validation() {
        assert!(RecommendationId::new(RecommendationId::generate().as_str()).is_ok());
        assert!(RecommendationId::new("").is_err());
        assert!(RecommendationId::new("rec*").is_err());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let rec = Recommendation::new(PropertyId::generate(), user("a"), user("b"), None).unwrap();
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["recommendedBy"], "a");
        assert_eq!(json["recommendedTo"], "b");
        assert_eq!(json["isRead"], false);
        assert!(json.get("message").is_none());
    }
}
