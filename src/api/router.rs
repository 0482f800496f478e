use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth;
use super::favourites;
use super::health;
use super::middleware::rate_limit;
use super::properties;
use super::recommendations;
use super::state::AppState;

/// Create the full router with application state, mounted under `/api`
///
/// Health checks are never rate limited.
pub fn create_router(state: AppState) -> Router {
    let route_cache = state.route_cache.clone();

    let mut resources = Router::new()
        // Accounts
        .nest("/auth", auth::create_auth_router())
        // Listings
        .nest("/properties", properties::create_properties_router(route_cache))
        // Per-user favourites
        .nest("/favourites", favourites::create_favourites_router())
        // User to user recommendations
        .nest(
            "/recommendations",
            recommendations::create_recommendations_router(),
        );

    if let Some(limiter) = state.rate_limiter.clone() {
        resources = resources.layer(from_fn_with_state(limiter, rate_limit));
    }

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::ready_check))
        .merge(resources);

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
