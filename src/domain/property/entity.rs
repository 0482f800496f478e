//! Property entity and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_bathrooms, validate_color_theme, validate_non_negative, validate_property_id,
    validate_rating, validate_required, validate_title, PropertyValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Property identifier - alphanumeric + hyphens, max 64 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyId(String);

impl PropertyId {
    /// Create a new PropertyId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, PropertyValidationError> {
        let id = id.into();
        validate_property_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PropertyId {
    type Error = PropertyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for PropertyId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Kind of dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(alias = "apartment")]
    Apartment,
    #[serde(alias = "bungalow")]
    Bungalow,
    #[serde(alias = "villa")]
    Villa,
    #[serde(alias = "penthouse")]
    Penthouse,
    #[serde(alias = "studio")]
    Studio,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Apartment => "Apartment",
            Self::Bungalow => "Bungalow",
            Self::Villa => "Villa",
            Self::Penthouse => "Penthouse",
            Self::Studio => "Studio",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for PropertyType {
    type Err = PropertyValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" => Ok(Self::Apartment),
            "bungalow" => Ok(Self::Bungalow),
            "villa" => Ok(Self::Villa),
            "penthouse" => Ok(Self::Penthouse),
            "studio" => Ok(Self::Studio),
            _ => Err(PropertyValidationError::UnknownPropertyType(s.to_string())),
        }
    }
}

/// Whether a property is offered for sale or rent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[serde(alias = "Sale")]
    Sale,
    #[serde(alias = "Rent")]
    Rent,
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => write!(f, "sale"),
            Self::Rent => write!(f, "rent"),
        }
    }
}

impl std::str::FromStr for ListingType {
    type Err = PropertyValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" => Ok(Self::Sale),
            "rent" => Ok(Self::Rent),
            _ => Err(PropertyValidationError::UnknownListingType(s.to_string())),
        }
    }
}

fn default_color_theme() -> String {
    "#000000".to_string()
}

/// Listing data supplied by the owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    /// Owner-facing listing reference (e.g. "PROP1001")
    pub listing_code: String,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub price: f64,
    pub state: String,
    pub city: String,
    pub area_sq_ft: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub furnished: bool,
    pub available_from: NaiveDate,
    /// Agent or owner name shown on the listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_by: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_color_theme")]
    pub color_theme: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_verified: bool,
    pub listing_type: ListingType,
    #[serde(default)]
    pub images: Vec<String>,
}

impl PropertyDetails {
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        validate_required("Listing code", &self.listing_code)
            .map_err(|_| PropertyValidationError::EmptyListingCode)?;
        validate_title(&self.title)?;
        validate_required("State", &self.state)?;
        validate_required("City", &self.city)?;
        validate_non_negative("Price", self.price)?;
        validate_non_negative("Area", self.area_sq_ft)?;
        validate_bathrooms(self.bathrooms)?;
        validate_rating(self.rating)?;
        validate_color_theme(&self.color_theme)?;
        Ok(())
    }

    fn normalize(&mut self) {
        self.listing_code = self.listing_code.trim().to_string();
        self.title = self.title.trim().to_string();
        self.state = self.state.trim().to_string();
        self.city = self.city.trim().to_string();
        self.amenities = trimmed_non_empty(std::mem::take(&mut self.amenities));
        self.tags = trimmed_non_empty(std::mem::take(&mut self.tags));
    }
}

fn trimmed_non_empty(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Partial update of a property; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub listing_code: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub price: Option<f64>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub area_sq_ft: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub amenities: Option<Vec<String>>,
    pub furnished: Option<bool>,
    pub available_from: Option<NaiveDate>,
    pub listed_by: Option<String>,
    pub tags: Option<Vec<String>>,
    pub color_theme: Option<String>,
    pub rating: Option<f64>,
    pub is_verified: Option<bool>,
    pub listing_type: Option<ListingType>,
    /// Image URLs appended to the existing list
    pub images: Option<Vec<String>>,
}

/// A property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    id: PropertyId,
    #[serde(flatten)]
    details: PropertyDetails,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Property {
    /// Create a new property owned by `created_by`
    pub fn new(
        mut details: PropertyDetails,
        created_by: UserId,
    ) -> Result<Self, PropertyValidationError> {
        details.normalize();
        details.validate()?;

        let now = Utc::now();

        Ok(Self {
            id: PropertyId::generate(),
            details,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &PropertyId {
        &self.id
    }

    pub fn details(&self) -> &PropertyDetails {
        &self.details
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.created_by == user
    }

    /// Applies a partial update; the property is unchanged if validation fails
    pub fn apply(&mut self, update: PropertyUpdate) -> Result<(), PropertyValidationError> {
        let mut details = self.details.clone();

        if let Some(v) = update.listing_code {
            details.listing_code = v;
        }
        if let Some(v) = update.title {
            details.title = v;
        }
        if let Some(v) = update.property_type {
            details.property_type = v;
        }
        if let Some(v) = update.price {
            details.price = v;
        }
        if let Some(v) = update.state {
            details.state = v;
        }
        if let Some(v) = update.city {
            details.city = v;
        }
        if let Some(v) = update.area_sq_ft {
            details.area_sq_ft = v;
        }
        if let Some(v) = update.bedrooms {
            details.bedrooms = v;
        }
        if let Some(v) = update.bathrooms {
            details.bathrooms = v;
        }
        if let Some(v) = update.amenities {
            details.amenities = v;
        }
        if let Some(v) = update.furnished {
            details.furnished = v;
        }
        if let Some(v) = update.available_from {
            details.available_from = v;
        }
        if let Some(v) = update.listed_by {
            details.listed_by = Some(v);
        }
        if let Some(v) = update.tags {
            details.tags = v;
        }
        if let Some(v) = update.color_theme {
            details.color_theme = v;
        }
        if let Some(v) = update.rating {
            details.rating = v;
        }
        if let Some(v) = update.is_verified {
            details.is_verified = v;
        }
        if let Some(v) = update.listing_type {
            details.listing_type = v;
        }
        if let Some(v) = update.images {
            details.images.extend(v);
        }

        details.normalize();
        details.validate()?;

        self.details = details;
        self.updated_at = Utc::now();
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }
}

impl StorageEntity for Property {
    type Key = PropertyId;
    const COLLECTION: &'static str = "Property";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn details(title: &str) -> PropertyDetails {
        PropertyDetails {
            listing_code: "PROP1001".to_string(),
            title: title.to_string(),
            property_type: PropertyType::Apartment,
            price: 2_500_000.0,
            state: "Maharashtra".to_string(),
            city: "Pune".to_string(),
            area_sq_ft: 950.0,
            bedrooms: 2,
            bathrooms: 2,
            amenities: vec!["Gym".to_string(), "Pool".to_string()],
            furnished: false,
            available_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            listed_by: Some("Acme Realty".to_string()),
            tags: vec!["new".to_string()],
            color_theme: "#000000".to_string(),
            rating: 4.0,
            is_verified: false,
            listing_type: ListingType::Sale,
            images: vec![],
        }
    }

    pub fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    pub fn property(title: &str) -> Property {
        Property::new(details(title), owner()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_new_property_normalizes_and_validates() {
        let mut d = details("  Sea view  ");
        d.amenities = vec![" Gym ".to_string(), "".to_string()];

        let property = Property::new(d, owner()).unwrap();

        assert_eq!(property.details().title, "Sea view");
        assert_eq!(property.details().amenities, vec!["Gym"]);
        assert!(property.is_owned_by(&owner()));
    }

    #[test]
    fn test_new_property_rejects_too_many_bathrooms() {
        let mut d = details("Flat");
        d.bathrooms = 11;

        assert_eq!(
            Property::new(d, owner()),
            Err(PropertyValidationError::TooManyBathrooms(10))
        );
    }

    #[test]
    fn test_apply_update_appends_images() {
        let mut property = property("Flat");
        property
            .apply(PropertyUpdate {
                price: Some(100.0),
                images: Some(vec!["https://img/1.jpg".to_string()]),
                ..Default::default()
            })
            .unwrap();

        property
            .apply(PropertyUpdate {
                images: Some(vec!["https://img/2.jpg".to_string()]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(property.details().price, 100.0);
        assert_eq!(property.details().images.len(), 2);
    }

    #[test]
    fn test_invalid_update_leaves_property_untouched() {
        let mut property = property("Flat");
        let before = property.clone();

        let result = property.apply(PropertyUpdate {
            price: Some(-1.0),
            title: Some("Changed".to_string()),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(property, before);
    }

    #[test]
    fn test_serialization_shape() {
        let property = property("Flat");
        let json = serde_json::to_value(&property).unwrap();

        assert_eq!(json["type"], "Apartment");
        assert_eq!(json["listingType"], "sale");
        assert_eq!(json["areaSqFt"], 950.0);
        assert_eq!(json["createdBy"], "owner-1");
        assert!(json["id"].is_string());

        let back: Property = serde_json::from_value(json).unwrap();
        assert_eq!(back, property);
    }

    #[test]
    fn test_property_type_from_str() {
        assert_eq!("villa".parse::<PropertyType>().unwrap(), PropertyType::Villa);
        assert_eq!(" STUDIO ".parse::<PropertyType>().unwrap(), PropertyType::Studio);
        assert!("castle".parse::<PropertyType>().is_err());
        assert_eq!("Rent".parse::<ListingType>().unwrap(), ListingType::Rent);
    }

    #[test]
    fn test_create_payload_defaults() {
        let json = serde_json::json!({
            "listingCode": "P1",
            "title": "Flat",
            "type": "Villa",
            "price": 10,
            "state": "Goa",
            "city": "Panaji",
            "areaSqFt": 1200,
            "bedrooms": 3,
            "bathrooms": 2,
            "availableFrom": "2025-06-01",
            "listingType": "rent"
        });

        let details: PropertyDetails = serde_json::from_value(json).unwrap();

        assert_eq!(details.color_theme, "#000000");
        assert_eq!(details.rating, 0.0);
        assert!(details.amenities.is_empty());
        assert!(details.validate().is_ok());
    }
}
