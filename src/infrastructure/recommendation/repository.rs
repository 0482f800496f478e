//! Storage-backed recommendation repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::recommendation::{
    Recommendation, RecommendationId, RecommendationRepository, RecommendationScope,
};
use crate::domain::storage::Storage;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of RecommendationRepository
#[derive(Debug)]
pub struct StorageRecommendationRepository {
    storage: Arc<dyn Storage<Recommendation>>,
}

impl StorageRecommendationRepository {
    pub fn new(storage: Arc<dyn Storage<Recommendation>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RecommendationRepository for StorageRecommendationRepository {
    async fn create(&self, recommendation: Recommendation) -> Result<Recommendation, DomainError> {
        let existing = self
            .storage
            .find(&|r: &Recommendation| r.duplicates(&recommendation))
            .await?;

        if !existing.is_empty() {
            return Err(DomainError::conflict(format!(
                "Property '{}' was already recommended by '{}' to '{}'",
                recommendation.property_id(),
                recommendation.recommended_by(),
                recommendation.recommended_to()
            )));
        }

        self.storage.create(recommendation).await
    }

    async fn list_for(
        &self,
        user: &UserId,
        scope: RecommendationScope,
        page: &PageRequest,
    ) -> Result<Page<Recommendation>, DomainError> {
        let mut recommendations = self
            .storage
            .find(&|r: &Recommendation| scope.matches(user, r))
            .await?;

        recommendations.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(page.paginate(recommendations))
    }

    async fn mark_read(
        &self,
        id: &RecommendationId,
        recipient: &UserId,
    ) -> Result<Option<Recommendation>, DomainError> {
        let Some(mut recommendation) = self.storage.get(id).await? else {
            return Ok(None);
        };
        if recommendation.recommended_to() != recipient {
            return Ok(None);
        }

        recommendation.mark_read();
        self.storage.update(recommendation).await.map(Some)
    }

    async fn delete_for_participant(
        &self,
        id: &RecommendationId,
        user: &UserId,
    ) -> Result<Option<Recommendation>, DomainError> {
        let Some(recommendation) = self.storage.get(id).await? else {
            return Ok(None);
        };
        if !recommendation.involves(user) {
            return Ok(None);
        }

        if self.storage.delete(id).await? {
            Ok(Some(recommendation))
        } else {
            Ok(None)
        }
    }
}
