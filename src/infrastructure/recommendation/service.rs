//! Recommendation service - send, list, mark read and delete

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::property::{Property, PropertyId, PropertyRepository};
use crate::domain::recommendation::{
    Recommendation, RecommendationId, RecommendationRepository, RecommendationScope,
};
use crate::domain::user::{normalize_email, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::UserSummary;

/// Request body for sending a recommendation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRecommendation {
    pub property_id: String,
    pub recipient_email: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// A recommendation joined with its property and both participants
///
/// Joined fields are `None` when the referenced document no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub id: RecommendationId,
    pub property_id: PropertyId,
    pub property: Option<Property>,
    pub recommended_by: Option<UserSummary>,
    pub recommended_to: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Recommendation use cases
#[derive(Debug)]
pub struct RecommendationService<R, P, U>
where
    R: RecommendationRepository,
    P: PropertyRepository,
    U: UserRepository,
{
    recommendations: Arc<R>,
    properties: Arc<P>,
    users: Arc<U>,
}

fn parse_recommendation_id(id: &str) -> Result<RecommendationId, DomainError> {
    RecommendationId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

impl<R, P, U> RecommendationService<R, P, U>
where
    R: RecommendationRepository,
    P: PropertyRepository,
    U: UserRepository,
{
    pub fn new(recommendations: Arc<R>, properties: Arc<P>, users: Arc<U>) -> Self {
        Self {
            recommendations,
            properties,
            users,
        }
    }

    /// Sends a property to another registered user
    pub async fn send(
        &self,
        sender: &UserId,
        request: SendRecommendation,
    ) -> Result<RecommendationView, DomainError> {
        let property_id = PropertyId::new(request.property_id.trim())
            .map_err(|e| DomainError::invalid_id(e.to_string()))?;

        if self.properties.get(&property_id).await?.is_none() {
            return Err(DomainError::not_found("Property not found."));
        }

        let recipient = match normalize_email(&request.recipient_email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        }
        .ok_or_else(|| DomainError::not_found("Recipient user not found with this email"))?;

        if recipient.id() == sender {
            return Err(DomainError::validation("Cannot recommend property to yourself"));
        }

        let recommendation = Recommendation::new(
            property_id,
            sender.clone(),
            recipient.id().clone(),
            request.message.as_deref(),
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let recommendation = self
            .recommendations
            .create(recommendation)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => {
                    DomainError::validation("Property already recommended to this user")
                }
                other => other,
            })?;

        info!(
            property = %recommendation.property_id(),
            from = %sender,
            to = %recipient.id(),
            "Property recommended"
        );

        self.view(recommendation).await
    }

    /// One page of a user's received or sent recommendations, newest first
    pub async fn list(
        &self,
        user: &UserId,
        scope: RecommendationScope,
        page: &PageRequest,
    ) -> Result<Page<RecommendationView>, DomainError> {
        let recommendations = self.recommendations.list_for(user, scope, page).await?;

        let mut views = Vec::with_capacity(recommendations.items.len());
        for recommendation in recommendations.items {
            views.push(self.view(recommendation).await?);
        }

        Ok(Page {
            items: views,
            pagination: recommendations.pagination,
        })
    }

    /// Only the recipient may mark a recommendation as read
    pub async fn mark_read(
        &self,
        id: &str,
        user: &UserId,
    ) -> Result<RecommendationView, DomainError> {
        let id = parse_recommendation_id(id)?;

        let recommendation = self
            .recommendations
            .mark_read(&id, user)
            .await?
            .ok_or_else(|| DomainError::not_found("Recommendation not found"))?;

        self.view(recommendation).await
    }

    /// Either participant may delete a recommendation
    pub async fn delete(&self, id: &str, user: &UserId) -> Result<(), DomainError> {
        let id = parse_recommendation_id(id)?;

        self.recommendations
            .delete_for_participant(&id, user)
            .await?
            .ok_or_else(|| DomainError::not_found("Recommendation not found or unauthorized"))?;

        info!(recommendation = %id, user = %user, "Deleted recommendation");
        Ok(())
    }

    async fn view(&self, recommendation: Recommendation) -> Result<RecommendationView, DomainError> {
        let property = self.properties.get(recommendation.property_id()).await?;
        let recommended_by = self.users.get(recommendation.recommended_by()).await?;
        let recommended_to = self.users.get(recommendation.recommended_to()).await?;

        Ok(RecommendationView {
            id: recommendation.id().clone(),
            property_id: recommendation.property_id().clone(),
            property,
            recommended_by: recommended_by.as_ref().map(UserSummary::from),
            recommended_to: recommended_to.as_ref().map(UserSummary::from),
            message: recommendation.message().map(str::to_string),
            is_read: recommendation.is_read(),
            created_at: recommendation.created_at(),
            updated_at: recommendation.updated_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::fixtures;
    use crate::domain::user::User;
    use crate::infrastructure::property::StoragePropertyRepository;
    use crate::infrastructure::recommendation::StorageRecommendationRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::StorageUserRepository;

    type Service = RecommendationService<
        StorageRecommendationRepository,
        StoragePropertyRepository,
        StorageUserRepository,
    >;

    struct Fixture {
        service: Service,
        property: String,
        asha: User,
        ravi: User,
    }

    fn setup() -> Fixture {
        let property = fixtures::property("Sea View");
        let property_id = property.id().to_string();

        let asha = User::new("Asha", "asha@example.com", "$argon2id$test").unwrap();
        let ravi = User::new("Ravi", "ravi@example.com", "$argon2id$test").unwrap();

        let service = RecommendationService::new(
            Arc::new(StorageRecommendationRepository::new(Arc::new(
                InMemoryStorage::<Recommendation>::new(),
            ))),
            Arc::new(StoragePropertyRepository::new(Arc::new(
                InMemoryStorage::with_entities([property]),
            ))),
            Arc::new(StorageUserRepository::new(Arc::new(
                InMemoryStorage::with_entities([asha.clone(), ravi.clone()]),
            ))),
        );

        Fixture {
            service,
            property: property_id,
            asha,
            ravi,
        }
    }

    fn request(property: &str, email: &str, message: Option<&str>) -> SendRecommendation {
        SendRecommendation {
            property_id: property.to_string(),
            recipient_email: email.to_string(),
            message: message.map(str::to_string),
        }
    }

    fn message_of(err: DomainError) -> String {
        match err {
            DomainError::NotFound { message } | DomainError::Validation { message } => message,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_joins_property_and_users() {
        let f = setup();

        let view = f
            .service
            .send(
                f.asha.id(),
                request(&f.property, "Ravi@Example.com", Some(" Have a look ")),
            )
            .await
            .unwrap();

        assert_eq!(view.property.unwrap().details().title, "Sea View");
        assert_eq!(view.recommended_by.unwrap().name, "Asha");
        assert_eq!(view.recommended_to.unwrap().email, "ravi@example.com");
        assert_eq!(view.message.as_deref(), Some("Have a look"));
        assert!(!view.is_read);
    }

    #[tokio::test]
    async fn test_send_rejections() {
        let f = setup();

        let err = f
            .service
            .send(f.asha.id(), request("0b6c7a52-ffff", "ravi@example.com", None))
            .await
            .unwrap_err();
        assert_eq!(message_of(err), "Property not found.");

        let err = f
            .service
            .send(f.asha.id(), request(&f.property, "nobody@example.com", None))
            .await
            .unwrap_err();
        assert_eq!(message_of(err), "Recipient user not found with this email");

        let err = f
            .service
            .send(f.asha.id(), request(&f.property, "asha@example.com", None))
            .await
            .unwrap_err();
        assert_eq!(message_of(err), "Cannot recommend property to yourself");

        f.service
            .send(f.asha.id(), request(&f.property, "ravi@example.com", None))
            .await
            .unwrap();
        let err = f
            .service
            .send(f.asha.id(), request(&f.property, "ravi@example.com", Some("again")))
            .await
            .unwrap_err();
        assert_eq!(message_of(err), "Property already recommended to this user");

        let long = "x".repeat(501);
        let err = f
            .service
            .send(f.ravi.id(), request(&f.property, "asha@example.com", Some(&long)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_read_and_delete_permissions() {
        let f = setup();
        let sent = f
            .service
            .send(f.asha.id(), request(&f.property, "ravi@example.com", None))
            .await
            .unwrap();
        let id = sent.id.to_string();

        let err = f.service.mark_read(&id, f.asha.id()).await.unwrap_err();
        assert_eq!(message_of(err), "Recommendation not found");

        let read = f.service.mark_read(&id, f.ravi.id()).await.unwrap();
        assert!(read.is_read);

        let unread = f
            .service
            .list(
                f.ravi.id(),
                RecommendationScope::Received { unread_only: true },
                &PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(unread.pagination.total, 0);

        let stranger = UserId::new("stranger").unwrap();
        let err = f.service.delete(&id, &stranger).await.unwrap_err();
        assert_eq!(message_of(err), "Recommendation not found or unauthorized");

        f.service.delete(&id, f.asha.id()).await.unwrap();
        let sent = f
            .service
            .list(f.asha.id(), RecommendationScope::Sent, &PageRequest::default())
            .await
            .unwrap();
        assert!(sent.items.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let f = setup();

        let err = f.service.delete("rec*", f.asha.id()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidId { .. }));
    }
}
