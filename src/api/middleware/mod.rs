//! API middleware components

pub mod rate_limit;
pub mod route_cache;
pub mod user_auth;

pub use rate_limit::rate_limit;
pub use route_cache::{cache_response, invalidate_routes, RouteCache, X_CACHE};
pub use user_auth::RequireUser;
