//! Per-user favourites endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, PageParams};
use crate::domain::favourite::{Favourite, FavouriteId};
use crate::domain::pagination::Pagination;
use crate::infrastructure::favourite::FavouriteView;

#[derive(Debug, Serialize)]
pub struct FavouriteListData {
    pub favorites: Vec<FavouriteView>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct FavouriteData {
    pub favourite: Favourite,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteStatus {
    pub is_favorite: bool,
    pub favorite_id: Option<FavouriteId>,
}

impl From<Option<Favourite>> for FavouriteStatus {
    fn from(favourite: Option<Favourite>) -> Self {
        Self {
            is_favorite: favourite.is_some(),
            favorite_id: favourite.map(|f| f.id().clone()),
        }
    }
}

/// GET /api/favourites
pub async fn list_favourites(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<PageParams>,
) -> Result<ApiResponse<FavouriteListData>, ApiError> {
    let page = params.to_page_request()?;
    let page = state.favourite_service.list(user.id(), &page).await?;

    Ok(ApiResponse::ok(FavouriteListData {
        favorites: page.items,
        pagination: page.pagination,
    }))
}

/// POST /api/favourites/{propertyId}
pub async fn add_favourite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(property_id): Path<String>,
) -> Result<(StatusCode, ApiResponse<FavouriteData>), ApiError> {
    let favourite = state.favourite_service.add(user.id(), &property_id).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(FavouriteData { favourite })
            .with_message("Property successfully added to favourites"),
    ))
}

/// DELETE /api/favourites/{propertyId}
pub async fn remove_favourite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(property_id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state
        .favourite_service
        .remove(user.id(), &property_id)
        .await?;

    Ok(ApiResponse::message(
        "Property successfully removed from favourites",
    ))
}

/// GET /api/favourites/{propertyId}/status
pub async fn favourite_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(property_id): Path<String>,
) -> Result<ApiResponse<FavouriteStatus>, ApiError> {
    let favourite = state
        .favourite_service
        .favourite_status(user.id(), &property_id)
        .await?;

    Ok(ApiResponse::ok(favourite.into()))
}

pub fn create_favourites_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favourites))
        .route("/{property_id}", post(add_favourite).delete(remove_favourite))
        .route("/{property_id}/status", get(favourite_status))
}
