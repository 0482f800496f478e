//! Property validation

use thiserror::Error;

/// Errors that can occur during property validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropertyValidationError {
    #[error("Property ID cannot be empty")]
    EmptyId,

    #[error("Property ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Property ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("Property title is required")]
    EmptyTitle,

    #[error("Property title cannot exceed {0} characters")]
    TitleTooLong(usize),

    #[error("Listing code is required")]
    EmptyListingCode,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must be a non-negative number")]
    NegativeNumber(&'static str),

    #[error("Maximum {0} bathrooms allowed")]
    TooManyBathrooms(u32),

    #[error("Rating must be between 0 and {0}")]
    RatingOutOfRange(u32),

    #[error("Color theme must be a hex color like #1a2b3c")]
    InvalidColorTheme,

    #[error("Unknown property type '{0}'. Valid types: Apartment, Bungalow, Villa, Penthouse, Studio")]
    UnknownPropertyType(String),

    #[error("Unknown listing type '{0}'. Valid types: sale, rent")]
    UnknownListingType(String),
}

const MAX_PROPERTY_ID_LENGTH: usize = 64;
const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_BATHROOMS: u32 = 10;
pub const MAX_RATING: u32 = 5;

/// Validate a property ID
pub fn validate_property_id(id: &str) -> Result<(), PropertyValidationError> {
    if id.is_empty() {
        return Err(PropertyValidationError::EmptyId);
    }

    if id.len() > MAX_PROPERTY_ID_LENGTH {
        return Err(PropertyValidationError::IdTooLong(MAX_PROPERTY_ID_LENGTH));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(PropertyValidationError::InvalidIdCharacters);
    }

    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), PropertyValidationError> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(PropertyValidationError::EmptyTitle);
    }

    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(PropertyValidationError::TitleTooLong(MAX_TITLE_LENGTH));
    }

    Ok(())
}

pub fn validate_non_negative(field: &'static str, value: f64) -> Result<(), PropertyValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PropertyValidationError::NegativeNumber(field));
    }

    Ok(())
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), PropertyValidationError> {
    if value.trim().is_empty() {
        return Err(PropertyValidationError::MissingField(field));
    }

    Ok(())
}

pub fn validate_bathrooms(bathrooms: u32) -> Result<(), PropertyValidationError> {
    if bathrooms > MAX_BATHROOMS {
        return Err(PropertyValidationError::TooManyBathrooms(MAX_BATHROOMS));
    }

    Ok(())
}

pub fn validate_rating(rating: f64) -> Result<(), PropertyValidationError> {
    if !rating.is_finite() || rating < 0.0 || rating > MAX_RATING as f64 {
        return Err(PropertyValidationError::RatingOutOfRange(MAX_RATING));
    }

    Ok(())
}

pub fn validate_color_theme(color: &str) -> Result<(), PropertyValidationError> {
    let hex = color
        .strip_prefix('#')
        .ok_or(PropertyValidationError::InvalidColorTheme)?;

    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PropertyValidationError::InvalidColorTheme);
    }

    Ok(())
}
