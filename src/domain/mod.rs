//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod favourite;
pub mod pagination;
pub mod property;
pub mod recommendation;
pub mod storage;
pub mod user;

pub use cache::{
    Cache, CacheKeys, CacheLookup, CacheNamespace, CacheTtl, CacheTtlPolicy,
    CacheWriteOutcome, GlobPattern,
};
pub use error::DomainError;
pub use favourite::{Favourite, FavouriteId, FavouriteRepository};
pub use pagination::{Page, PageRequest, Pagination};
pub use property::{
    ListingType, Property, PropertyDetails, PropertyFilter, PropertyId, PropertyListQuery,
    PropertyRepository, PropertySortField, PropertyType, PropertyUpdate, SortOrder,
};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use user::{AuthenticatedUser, UserId};
