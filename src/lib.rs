//! Property Listing API
//!
//! Property listings, accounts, favourites and recommendations over an
//! authoritative store, with a best-effort read-through cache:
//! - Redis, in-memory (moka) or disabled cache backends
//! - Canonical list keys so equivalent queries share one entry
//! - Invalidate-on-write for lists, details and favourites pages
//! - Optional whole-response caching of property routes
//! - Per-client rate limiting of the resource routes

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::middleware::RouteCache;
use api::state::AppState;
use domain::favourite::Favourite;
use domain::property::Property;
use domain::recommendation::Recommendation;
use domain::user::User;
use infrastructure::{
    auth::{JwtConfig, JwtService},
    cache::{CacheFactory, CacheManager},
    favourite::{FavouriteService, StorageFavouriteRepository},
    property::{PropertyService, StoragePropertyRepository},
    rate_limiter::RateLimiter,
    recommendation::{RecommendationService, StorageRecommendationRepository},
    storage::InMemoryStorage,
    user::{Argon2Hasher, StorageUserRepository, UserService},
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
///
/// An unreachable Redis does not prevent startup: requests are served from
/// the store while the cache keeps retrying the connection in the background.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache_config = config.cache.backend_config()?;
    let cache = CacheFactory::new().create_or_fallback(&cache_config).await;
    let cache = Arc::new(CacheManager::new(cache, config.cache.ttl));
    info!(backend = cache.backend(), "Cache ready");

    let properties = Arc::new(StoragePropertyRepository::new(Arc::new(
        InMemoryStorage::<Property>::new(),
    )));
    let favourites = Arc::new(StorageFavouriteRepository::new(Arc::new(
        InMemoryStorage::<Favourite>::new(),
    )));
    let users = Arc::new(StorageUserRepository::new(Arc::new(
        InMemoryStorage::<User>::new(),
    )));
    let recommendations = Arc::new(StorageRecommendationRepository::new(Arc::new(
        InMemoryStorage::<Recommendation>::new(),
    )));

    let property_service = Arc::new(PropertyService::new(properties.clone(), cache.clone()));
    let favourite_service = Arc::new(FavouriteService::new(
        favourites,
        properties.clone(),
        cache.clone(),
    ));
    let user_service = Arc::new(UserService::new(users.clone(), Arc::new(Argon2Hasher::new())));
    let recommendation_service = Arc::new(RecommendationService::new(
        recommendations,
        properties,
        users,
    ));

    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.expiration_hours,
    )));

    let mut state = AppState::new(
        property_service,
        favourite_service,
        user_service,
        recommendation_service,
        cache.clone(),
        jwt_service,
    );

    if config.cache.route.enabled {
        info!(ttl_secs = config.cache.route.ttl_secs, "Route cache enabled");
        state = state.with_route_cache(RouteCache::new(cache, config.cache.route.ttl()));
    }

    if config.rate_limit.enabled {
        info!(
            window_secs = config.rate_limit.window_secs,
            max_requests = config.rate_limit.max_requests,
            "Rate limiting enabled"
        );
        state = state.with_rate_limiter(Arc::new(RateLimiter::from_config(&config.rate_limit)));
    }

    Ok(state)
}
