//! Cache key namespaces and builders
//!
//! Every key starts with a namespace prefix so that a whole namespace, or one
//! user's slice of it, can be cleared with a single glob pattern.

use serde::Serialize;

use crate::domain::pagination::PageRequest;
use crate::domain::property::{PropertyFilter, PropertyId, PropertyListQuery, PropertySortField, SortOrder};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Logical partitions of the key space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    PropertyList,
    PropertyDetail,
    UserFavorites,
    Route,
}

impl CacheNamespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::PropertyList => "properties:list:",
            Self::PropertyDetail => "property:detail:",
            Self::UserFavorites => "user:favorites:",
            Self::Route => "cache:",
        }
    }

    /// Pattern matching every key in the namespace
    pub fn pattern(&self) -> String {
        format!("{}*", self.prefix())
    }
}

/// Canonical shape of a list request inside its key
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListKey<'a> {
    filter: &'a PropertyFilter,
    page: u32,
    limit: u32,
    sort_by: PropertySortField,
    sort_order: SortOrder,
}

/// Builders for every key the application reads or writes
pub struct CacheKeys;

impl CacheKeys {
    /// `properties:list:<canonical json>`
    ///
    /// The filter is already normalized, so equal effective parameters give
    /// byte-identical keys whatever order the query string used.
    pub fn property_list(query: &PropertyListQuery) -> Result<String, DomainError> {
        let canonical = ListKey {
            filter: &query.filter,
            page: query.page.page(),
            limit: query.page.limit(),
            sort_by: query.sort_by,
            sort_order: query.sort_order,
        };

        let json = serde_json::to_string(&canonical)
            .map_err(|e| DomainError::cache(format!("Failed to build list key: {}", e)))?;

        Ok(format!("{}{}", CacheNamespace::PropertyList.prefix(), json))
    }

    pub fn property_list_pattern() -> String {
        CacheNamespace::PropertyList.pattern()
    }

    pub fn property_detail(id: &PropertyId) -> String {
        format!("{}{}", CacheNamespace::PropertyDetail.prefix(), id)
    }

    pub fn user_favorites(user_id: &UserId, page: &PageRequest) -> String {
        format!(
            "{}{}:page={}:limit={}",
            CacheNamespace::UserFavorites.prefix(),
            user_id,
            page.page(),
            page.limit()
        )
    }

    /// Every favourites page of one user, and nobody else's
    pub fn user_favorites_pattern(user_id: &UserId) -> String {
        format!("{}{}:*", CacheNamespace::UserFavorites.prefix(), user_id)
    }

    /// `cache:<path and query>` for whole-response caching
    pub fn route(path_and_query: &str) -> String {
        format!("{}{}", CacheNamespace::Route.prefix(), path_and_query)
    }

    /// Route entries for any property path
    pub fn property_routes_pattern() -> String {
        format!("{}*properties*", CacheNamespace::Route.prefix())
    }
}
