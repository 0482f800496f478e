//! Recommendation infrastructure - storage-backed repository and service

mod repository;
mod service;

pub use repository::StorageRecommendationRepository;
pub use service::{RecommendationService, RecommendationView, SendRecommendation};
