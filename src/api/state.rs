//! Application state for shared services

use std::sync::Arc;

use crate::api::middleware::RouteCache;
use crate::domain::favourite::{Favourite, FavouriteRepository};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::property::{
    Property, PropertyDetails, PropertyListQuery, PropertyRepository, PropertyUpdate,
};
use crate::domain::recommendation::{RecommendationRepository, RecommendationScope};
use crate::domain::user::{Credentials, Registration, User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::cache::CacheManager;
use crate::infrastructure::favourite::{FavouriteService, FavouriteView};
use crate::infrastructure::property::PropertyService;
use crate::infrastructure::rate_limiter::RateLimiter;
use crate::infrastructure::recommendation::{
    RecommendationService, RecommendationView, SendRecommendation,
};
use crate::infrastructure::user::{PasswordHasher, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub property_service: Arc<dyn PropertyServiceTrait>,
    pub favourite_service: Arc<dyn FavouriteServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub recommendation_service: Arc<dyn RecommendationServiceTrait>,
    pub cache: Arc<CacheManager>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    /// Present when whole-response caching is enabled
    pub route_cache: Option<RouteCache>,
    /// Present when per-client rate limiting is enabled
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

impl AppState {
    pub fn new(
        property_service: Arc<dyn PropertyServiceTrait>,
        favourite_service: Arc<dyn FavouriteServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        recommendation_service: Arc<dyn RecommendationServiceTrait>,
        cache: Arc<CacheManager>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            property_service,
            favourite_service,
            user_service,
            recommendation_service,
            cache,
            jwt_service,
            route_cache: None,
            rate_limiter: None,
        }
    }

    pub fn with_route_cache(mut self, route_cache: RouteCache) -> Self {
        self.route_cache = Some(route_cache);
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }
}

/// Trait for property service operations
#[async_trait::async_trait]
pub trait PropertyServiceTrait: Send + Sync {
    async fn list(&self, query: &PropertyListQuery) -> Result<Page<Property>, DomainError>;
    async fn get(&self, id: &str) -> Result<Property, DomainError>;
    async fn list_by_owner(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Property>, DomainError>;
    async fn create(&self, owner: &UserId, details: PropertyDetails)
        -> Result<Property, DomainError>;
    async fn update(
        &self,
        id: &str,
        user: &UserId,
        update: PropertyUpdate,
    ) -> Result<Property, DomainError>;
    async fn delete(&self, id: &str, user: &UserId) -> Result<(), DomainError>;
}

/// Trait for favourite service operations
#[async_trait::async_trait]
pub trait FavouriteServiceTrait: Send + Sync {
    async fn list(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<FavouriteView>, DomainError>;
    async fn add(&self, user_id: &UserId, property_id: &str) -> Result<Favourite, DomainError>;
    async fn remove(&self, user_id: &UserId, property_id: &str) -> Result<(), DomainError>;
    async fn favourite_status(
        &self,
        user_id: &UserId,
        property_id: &str,
    ) -> Result<Option<Favourite>, DomainError>;
}

/// Trait for account operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, registration: Registration) -> Result<User, DomainError>;
    async fn login(&self, credentials: &Credentials) -> Result<User, DomainError>;
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}

/// Trait for recommendation operations
#[async_trait::async_trait]
pub trait RecommendationServiceTrait: Send + Sync {
    async fn send(
        &self,
        sender: &UserId,
        request: SendRecommendation,
    ) -> Result<RecommendationView, DomainError>;
    async fn list(
        &self,
        user: &UserId,
        scope: RecommendationScope,
        page: &PageRequest,
    ) -> Result<Page<RecommendationView>, DomainError>;
    async fn mark_read(&self, id: &str, user: &UserId)
        -> Result<RecommendationView, DomainError>;
    async fn delete(&self, id: &str, user: &UserId) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: PropertyRepository + 'static> PropertyServiceTrait for PropertyService<R> {
    async fn list(&self, query: &PropertyListQuery) -> Result<Page<Property>, DomainError> {
        PropertyService::list(self, query).await
    }

    async fn get(&self, id: &str) -> Result<Property, DomainError> {
        PropertyService::get(self, id).await
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        page: &PageRequest,
    ) -> Result<Page<Property>, DomainError> {
        PropertyService::list_by_owner(self, owner, page).await
    }

    async fn create(
        &self,
        owner: &UserId,
        details: PropertyDetails,
    ) -> Result<Property, DomainError> {
        PropertyService::create(self, owner, details).await
    }

    async fn update(
        &self,
        id: &str,
        user: &UserId,
        update: PropertyUpdate,
    ) -> Result<Property, DomainError> {
        PropertyService::update(self, id, user, update).await
    }

    async fn delete(&self, id: &str, user: &UserId) -> Result<(), DomainError> {
        PropertyService::delete(self, id, user).await
    }
}

#[async_trait::async_trait]
impl<F, P> FavouriteServiceTrait for FavouriteService<F, P>
where
    F: FavouriteRepository + 'static,
    P: PropertyRepository + 'static,
{
    async fn list(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<FavouriteView>, DomainError> {
        FavouriteService::list(self, user_id, page).await
    }

    async fn add(&self, user_id: &UserId, property_id: &str) -> Result<Favourite, DomainError> {
        FavouriteService::add(self, user_id, property_id).await
    }

    async fn remove(&self, user_id: &UserId, property_id: &str) -> Result<(), DomainError> {
        FavouriteService::remove(self, user_id, property_id).await
    }

    async fn favourite_status(
        &self,
        user_id: &UserId,
        property_id: &str,
    ) -> Result<Option<Favourite>, DomainError> {
        FavouriteService::favourite_status(self, user_id, property_id).await
    }
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        UserService::register(self, registration).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, DomainError> {
        UserService::login(self, credentials).await
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        UserService::find_by_email(self, email).await
    }
}

#[async_trait::async_trait]
impl<R, P, U> RecommendationServiceTrait for RecommendationService<R, P, U>
where
    R: RecommendationRepository + 'static,
    P: PropertyRepository + 'static,
    U: UserRepository + 'static,
{
    async fn send(
        &self,
        sender: &UserId,
        request: SendRecommendation,
    ) -> Result<RecommendationView, DomainError> {
        RecommendationService::send(self, sender, request).await
    }

    async fn list(
        &self,
        user: &UserId,
        scope: RecommendationScope,
        page: &PageRequest,
    ) -> Result<Page<RecommendationView>, DomainError> {
        RecommendationService::list(self, user, scope, page).await
    }

    async fn mark_read(
        &self,
        id: &str,
        user: &UserId,
    ) -> Result<RecommendationView, DomainError> {
        RecommendationService::mark_read(self, id, user).await
    }

    async fn delete(&self, id: &str, user: &UserId) -> Result<(), DomainError> {
        RecommendationService::delete(self, id, user).await
    }
}
