//! Storage domain - the authoritative document store

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::{Predicate, Storage};

#[cfg(test)]
pub use repository::mock;
#[cfg(test)]
pub(crate) use entity::test_support;
