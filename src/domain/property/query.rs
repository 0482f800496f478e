//! Property list queries: filtering, sorting and paging

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::entity::{ListingType, Property, PropertyType};
use crate::domain::pagination::PageRequest;
use crate::domain::DomainError;

/// Inclusive numeric bounds
///
/// Fields are declared `max` before `min` so the serialized form is in key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self { max, min })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Normalized filter criteria
///
/// Only set criteria are serialized, in lexicographic key order, with string
/// values trimmed and lowercased. Two filters built from the same effective
/// criteria therefore serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    area_sq_ft: Option<NumericRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    furnished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    listing_type: Option<ListingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<NumericRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    property_type: Option<PropertyType>,
}

fn normalize_text(value: &str) -> Option<String> {
    let value = value.trim().to_lowercase();
    (!value.is_empty()).then_some(value)
}

impl PropertyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn with_listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = Some(listing_type);
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.state = normalize_text(state);
        self
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = normalize_text(city);
        self
    }

    pub fn with_furnished(mut self, furnished: bool) -> Self {
        self.furnished = Some(furnished);
        self
    }

    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    pub fn with_bathrooms(mut self, bathrooms: u32) -> Self {
        self.bathrooms = Some(bathrooms);
        self
    }

    pub fn with_price(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price = NumericRange::new(min, max);
        self
    }

    pub fn with_area(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.area_sq_ft = NumericRange::new(min, max);
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut amenities: Vec<String> = amenities
            .into_iter()
            .filter_map(|a| normalize_text(a.as_ref()))
            .collect();
        amenities.sort();
        amenities.dedup();
        self.amenities = amenities;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a property satisfies every set criterion
    pub fn matches(&self, property: &Property) -> bool {
        let details = property.details();

        if self.property_type.is_some_and(|t| t != details.property_type) {
            return false;
        }
        if self.listing_type.is_some_and(|t| t != details.listing_type) {
            return false;
        }
        if self.furnished.is_some_and(|f| f != details.furnished) {
            return false;
        }
        if self.bedrooms.is_some_and(|b| b != details.bedrooms) {
            return false;
        }
        if self.bathrooms.is_some_and(|b| b != details.bathrooms) {
            return false;
        }
        if let Some(state) = &self.state {
            if !details.state.to_lowercase().contains(state.as_str()) {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !details.city.to_lowercase().contains(city.as_str()) {
                return false;
            }
        }
        if self.price.is_some_and(|r| !r.contains(details.price)) {
            return false;
        }
        if self.area_sq_ft.is_some_and(|r| !r.contains(details.area_sq_ft)) {
            return false;
        }
        if !self.amenities.is_empty() {
            // any-of
            let owned: Vec<String> = details.amenities.iter().map(|a| a.to_lowercase()).collect();
            let found = self
                .amenities
                .iter()
                .any(|wanted| owned.iter().any(|a| a.contains(wanted.as_str())));
            if !found {
                return false;
            }
        }

        true
    }
}

/// Field a property list can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertySortField {
    #[default]
    CreatedAt,
    Price,
    AreaSqFt,
    Rating,
    Bedrooms,
    Bathrooms,
    Title,
}

impl PropertySortField {
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let (da, db) = (a.details(), b.details());
        match self {
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
            Self::Price => da.price.total_cmp(&db.price),
            Self::AreaSqFt => da.area_sq_ft.total_cmp(&db.area_sq_ft),
            Self::Rating => da.rating.total_cmp(&db.rating),
            Self::Bedrooms => da.bedrooms.cmp(&db.bedrooms),
            Self::Bathrooms => da.bathrooms.cmp(&db.bathrooms),
            Self::Title => da.title.to_lowercase().cmp(&db.title.to_lowercase()),
        }
    }
}

impl std::str::FromStr for PropertySortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "createdat" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            "areasqft" => Ok(Self::AreaSqFt),
            "rating" => Ok(Self::Rating),
            "bedrooms" => Ok(Self::Bedrooms),
            "bathrooms" => Ok(Self::Bathrooms),
            "title" => Ok(Self::Title),
            _ => Err(DomainError::validation(format!(
                "Invalid sortBy '{}'. Valid fields: createdAt, price, areaSqFt, rating, bedrooms, bathrooms, title",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::validation(format!(
                "Invalid sortOrder '{}'. Use asc or desc",
                s
            ))),
        }
    }
}

/// A complete list request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyListQuery {
    pub filter: PropertyFilter,
    pub page: PageRequest,
    pub sort_by: PropertySortField,
    pub sort_order: SortOrder,
}

impl PropertyListQuery {
    /// Orders two properties; ties fall back to the id so paging is stable
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let ordering = self.sort_by.compare(a, b);
        let ordering = match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id().as_str().cmp(b.id().as_str()))
    }
}
