//! Recommendation repository trait

use async_trait::async_trait;

use super::entity::{Recommendation, RecommendationId};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Which side of a recommendation a listing is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationScope {
    Received { unread_only: bool },
    Sent,
}

impl RecommendationScope {
    pub fn matches(&self, user: &UserId, recommendation: &Recommendation) -> bool {
        match self {
            Self::Received { unread_only } => {
                recommendation.recommended_to() == user && !(*unread_only && recommendation.is_read())
            }
            Self::Sent => recommendation.recommended_by() == user,
        }
    }
}

/// Authoritative store of recommendations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Creates a recommendation, Conflict if the same triple was already sent
    async fn create(&self, recommendation: Recommendation) -> Result<Recommendation, DomainError>;

    /// Lists one side of a user's recommendations, newest first
    async fn list_for(
        &self,
        user: &UserId,
        scope: RecommendationScope,
        page: &PageRequest,
    ) -> Result<Page<Recommendation>, DomainError>;

    /// Marks a recommendation addressed to `recipient` as read
    async fn mark_read(
        &self,
        id: &RecommendationId,
        recipient: &UserId,
    ) -> Result<Option<Recommendation>, DomainError>;

    /// Removes a recommendation `user` sent or received
    async fn delete_for_participant(
        &self,
        id: &RecommendationId,
        user: &UserId,
    ) -> Result<Option<Recommendation>, DomainError>;
}
