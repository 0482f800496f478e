//! Favourite entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::property::PropertyId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Favourite identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavouriteId(String);

impl FavouriteId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FavouriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for FavouriteId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A property bookmarked by a user; unique per (user, property)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favourite {
    id: FavouriteId,
    user_id: UserId,
    property_id: PropertyId,
    created_at: DateTime<Utc>,
}

impl Favourite {
    pub fn new(user_id: UserId, property_id: PropertyId) -> Self {
        Self {
            id: FavouriteId::generate(),
            user_id,
            property_id,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &FavouriteId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_for(&self, user_id: &UserId, property_id: &PropertyId) -> bool {
        &self.user_id == user_id && &self.property_id == property_id
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

impl StorageEntity for Favourite {
    type Key = FavouriteId;
    const COLLECTION: &'static str = "Favourite";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_favourite() {
        let user = UserId::new("user-1").unwrap();
        let property = PropertyId::generate();
        let favourite = Favourite::new(user.clone(), property.clone());

        assert!(favourite.is_for(&user, &property));
        assert!(!favourite.is_for(&UserId::new("user-2").unwrap(), &property));
        assert_ne!(favourite.id(), Favourite::new(user, property).id());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let favourite = Favourite::new(UserId::new("user-1").unwrap(), PropertyId::generate());
        let json = serde_json::to_value(&favourite).unwrap();

        assert_eq!(json["userId"], "user-1");
        assert!(json["propertyId"].is_string());
        assert!(json["createdAt"].is_string());
    }
}
