//! User infrastructure - Argon2 password hashing, storage-backed repository
//! and the account service

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StorageUserRepository;
pub use service::{UserService, UserSummary};
