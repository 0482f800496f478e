//! Authentication infrastructure module
//!
//! Bearer tokens are HS256 JWTs whose subject is the user id. No user store
//! is consulted: a valid signature is the whole proof of identity.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
