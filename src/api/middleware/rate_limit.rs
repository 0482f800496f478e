//! Per-client request limiting for the resource routes

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderName, HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::types::ApiError;
use crate::infrastructure::rate_limiter::{RateLimitResult, RateLimiter};

pub const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Client address: the socket peer, else the first `X-Forwarded-For` hop
fn client_key(request: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

fn insert_headers(headers: &mut HeaderMap, result: &RateLimitResult) {
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(result.limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(result.remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(result.reset_in_seconds));
}

/// Rejects a client with 429 once it exceeds the configured limit
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_key(&request);
    let result = limiter.check_and_record(&client).await;

    if !result.allowed {
        warn!(client = %client, "Rate limit exceeded");
        let mut response = ApiError::too_many_requests(
            "Too many requests from this IP, please try again later.",
        )
        .into_response();
        insert_headers(response.headers_mut(), &result);
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(result.reset_in_seconds));
        return response;
    }

    let mut response = next.run(request).await;
    insert_headers(response.headers_mut(), &result);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use tower::ServiceExt;

    fn app(max_requests: u32) -> Router {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(900), max_requests));
        Router::new()
            .route("/api/properties", get(|| async { "ok" }))
            .layer(from_fn_with_state(limiter, rate_limit))
    }

    fn request(forwarded_for: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/properties");
        if let Some(ip) = forwarded_for {
            builder = builder.header(X_FORWARDED_FOR, ip);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_over_limit_gets_429_envelope() {
        let app = app(2);

        for remaining in ["1", "0"] {
            let response = app.clone().oneshot(request(Some("10.0.0.1"))).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[RATELIMIT_LIMIT], "2");
            assert_eq!(response.headers()[RATELIMIT_REMAINING], remaining);
        }

        let response = app.oneshot(request(Some("10.0.0.1"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "message": "Too many requests from this IP, please try again later."
            })
        );
    }

    #[tokio::test]
    async fn test_clients_are_limited_separately() {
        let app = app(1);

        let response = app.clone().oneshot(request(Some("10.0.0.1, 172.16.0.1"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(request(Some("10.0.0.1"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let response = app.oneshot(request(Some("10.0.0.2"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_client_key_prefers_socket_address() {
        let mut request = request(Some("10.0.0.1"));
        assert_eq!(client_key(&request), "10.0.0.1");

        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 4000))));
        assert_eq!(client_key(&request), "192.168.1.7");

        assert_eq!(client_key(&Request::new(Body::empty())), "unknown");
    }
}
