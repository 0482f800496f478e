//! Infrastructure layer - Cache backends, storage and service implementations

pub mod auth;
pub mod cache;
pub mod favourite;
pub mod logging;
pub mod property;
pub mod rate_limiter;
pub mod recommendation;
pub mod storage;
pub mod user;
