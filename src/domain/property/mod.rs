//! Property domain module
//!
//! Property listings are the records served through the read-through cache.
//! Any write to a property invalidates the list namespace and the property's
//! detail entry.

mod entity;
mod query;
mod repository;
mod validation;

pub use entity::{
    ListingType, Property, PropertyDetails, PropertyId, PropertyType, PropertyUpdate,
};
pub use query::{NumericRange, PropertyFilter, PropertyListQuery, PropertySortField, SortOrder};
pub use repository::PropertyRepository;
pub use validation::{validate_property_id, PropertyValidationError};

#[cfg(test)]
pub(crate) use entity::fixtures;
#[cfg(test)]
pub use repository::MockPropertyRepository;
