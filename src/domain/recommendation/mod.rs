//! Recommendation domain module
//!
//! A user sends a property to another registered user, optionally with a
//! short note. Each (property, sender, recipient) triple is sent at most once.

mod entity;
mod repository;

pub use entity::{Recommendation, RecommendationError, RecommendationId};
pub use repository::{RecommendationRepository, RecommendationScope};

#[cfg(test)]
pub use repository::MockRecommendationRepository;
