//! Whole-response cache for public GET routes
//!
//! Responses are stored under `cache:<path and query>` and cleared by
//! `invalidate_routes` after a successful write to the same router.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::{OriginalUri, State},
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::cache::CacheLookup;
use crate::infrastructure::cache::CacheManager;

/// Response header reporting whether the route cache answered
pub const X_CACHE: &str = "x-cache";

/// Largest response body the route cache will buffer
const MAX_CACHED_BODY: usize = 1024 * 1024;

/// State shared by the route cache middlewares
#[derive(Debug, Clone)]
pub struct RouteCache {
    manager: Arc<CacheManager>,
    ttl: Duration,
}

impl RouteCache {
    pub fn new(manager: Arc<CacheManager>, ttl: Duration) -> Self {
        Self { manager, ttl }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedResponse {
    status: u16,
    body: serde_json::Value,
}

fn cache_path(request: &Request<Body>) -> String {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| request.uri());

    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Serves cached JSON for anonymous GET requests and stores successful ones
pub async fn cache_response(
    State(route_cache): State<RouteCache>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // responses to authenticated callers are user specific
    if request.method() != Method::GET || request.headers().contains_key(header::AUTHORIZATION) {
        return next.run(request).await;
    }

    let path = cache_path(&request);

    if let CacheLookup::Hit(cached) = route_cache
        .manager
        .get_route::<CachedResponse>(&path)
        .await
    {
        debug!(path = %path, "Route cache hit");
        let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK);
        return (
            status,
            [(X_CACHE, HeaderValue::from_static("HIT"))],
            Json(cached.body),
        )
            .into_response();
    }

    let response = next.run(request).await;

    if !response.status().is_success() || !is_json(&response) {
        return response;
    }

    let bounded = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_CACHED_BODY as u64);
    if !bounded {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes: Bytes = match to_bytes(body, MAX_CACHED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path, error = %e, "Failed to buffer response for route cache");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read response body")
                .into_response();
        }
    };

    if let Ok(body) = serde_json::from_slice::<serde_json::Value>(&bytes) {
        let cached = CachedResponse {
            status: parts.status.as_u16(),
            body,
        };
        let _ = route_cache
            .manager
            .cache_route(&path, &cached, route_cache.ttl)
            .await;
    }

    parts
        .headers
        .insert(X_CACHE, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

/// Clears every cached property route after a successful write
pub async fn invalidate_routes(
    State(route_cache): State<RouteCache>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mutating = !matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    );

    let response = next.run(request).await;

    if mutating && response.status().is_success() {
        let outcome = route_cache.manager.invalidate_property_routes().await;
        debug!(affected = outcome.affected(), "Cleared cached property routes");
    }

    response
}
