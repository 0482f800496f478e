//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod favourites;
pub mod health;
pub mod middleware;
pub mod properties;
pub mod recommendations;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::{RequireUser, RouteCache};
pub use router::create_router;
pub use state::AppState;
