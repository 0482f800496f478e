//! Users and caller identity
//!
//! Accounts are registered here; requests carry the caller's identity in a
//! verified bearer token.

mod entity;
mod repository;
mod validation;

pub use entity::{AuthenticatedUser, Credentials, Registration, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_name, validate_password, validate_user_id, UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;
