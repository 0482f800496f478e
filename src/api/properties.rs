//! Property listing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::{cache_response, invalidate_routes, RequireUser, RouteCache};
use crate::api::state::AppState;
use crate::api::types::{parse_param, ApiError, ApiResponse, Json, PageParams};
use crate::domain::pagination::{Page, Pagination};
use crate::domain::property::{
    ListingType, Property, PropertyDetails, PropertyFilter, PropertyListQuery, PropertySortField,
    PropertyType, PropertyUpdate, PropertyValidationError, SortOrder,
};

#[derive(Debug, Serialize)]
pub struct PropertyListData {
    pub properties: Vec<Property>,
    pub pagination: Pagination,
}

impl From<Page<Property>> for PropertyListData {
    fn from(page: Page<Property>) -> Self {
        Self {
            properties: page.items,
            pagination: page.pagination,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyData {
    pub property: Property,
}

/// Builds a list query from raw `?key=value` pairs
///
/// Scalar parameters are last-wins, `amenities` accumulates across repeats
/// and commas, blank values and unknown keys are ignored.
pub fn parse_list_query(params: &[(String, String)]) -> Result<PropertyListQuery, ApiError> {
    let mut scalars: Vec<(&str, &str)> = Vec::new();
    let mut amenities: Vec<&str> = Vec::new();

    for (key, value) in params {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if key == "amenities" {
            amenities.extend(value.split(','));
        } else {
            scalars.retain(|(k, _)| *k != key.as_str());
            scalars.push((key.as_str(), value));
        }
    }

    let get = |name: &str| {
        scalars
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    };
    let number = |name: &str| -> Result<Option<f64>, ApiError> {
        match get(name) {
            Some(value) => {
                let number = parse_param::<f64>(name, value)?;
                if !number.is_finite() {
                    return Err(ApiError::bad_request(format!(
                        "Invalid value '{}' for '{}'",
                        value, name
                    )));
                }
                Ok(Some(number))
            }
            None => Ok(None),
        }
    };

    let mut filter = PropertyFilter::new()
        .with_price(number("minPrice")?, number("maxPrice")?)
        .with_area(number("minArea")?, number("maxArea")?)
        .with_amenities(amenities);

    if let Some(value) = get("type") {
        let property_type: PropertyType = value
            .parse()
            .map_err(|e: PropertyValidationError| ApiError::bad_request(e.to_string()))?;
        filter = filter.with_property_type(property_type);
    }
    if let Some(value) = get("listingType") {
        let listing_type: ListingType = value
            .parse()
            .map_err(|e: PropertyValidationError| ApiError::bad_request(e.to_string()))?;
        filter = filter.with_listing_type(listing_type);
    }
    if let Some(value) = get("state") {
        filter = filter.with_state(value);
    }
    if let Some(value) = get("city") {
        filter = filter.with_city(value);
    }
    if let Some(value) = get("furnished") {
        filter = filter.with_furnished(parse_param("furnished", &value.to_lowercase())?);
    }
    if let Some(value) = get("bedrooms") {
        filter = filter.with_bedrooms(parse_param("bedrooms", value)?);
    }
    if let Some(value) = get("bathrooms") {
        filter = filter.with_bathrooms(parse_param("bathrooms", value)?);
    }

    let page = PageParams {
        page: get("page").map(str::to_string),
        limit: get("limit").map(str::to_string),
    }
    .to_page_request()?;

    Ok(PropertyListQuery {
        filter,
        page,
        sort_by: get("sortBy")
            .map(str::parse::<PropertySortField>)
            .transpose()?
            .unwrap_or_default(),
        sort_order: get("sortOrder")
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default(),
    })
}

/// GET /api/properties
pub async fn list_properties(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiResponse<PropertyListData>, ApiError> {
    let query = parse_list_query(&params)?;
    debug!(?query, "Listing properties");

    let page = state.property_service.list(&query).await?;
    Ok(ApiResponse::ok(page.into()))
}

/// GET /api/properties/my
pub async fn list_my_properties(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<PageParams>,
) -> Result<ApiResponse<PropertyListData>, ApiError> {
    let page = params.to_page_request()?;

    let page = state
        .property_service
        .list_by_owner(user.id(), &page)
        .await?;
    Ok(ApiResponse::ok(page.into()))
}

/// GET /api/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<PropertyData>, ApiError> {
    let property = state.property_service.get(&id).await?;
    Ok(ApiResponse::ok(PropertyData { property }))
}

/// POST /api/properties
pub async fn create_property(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(details): Json<PropertyDetails>,
) -> Result<(StatusCode, ApiResponse<PropertyData>), ApiError> {
    let property = state.property_service.create(user.id(), details).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(PropertyData { property }).with_message("Property created successfully"),
    ))
}

/// PUT /api/properties/{id}
pub async fn update_property(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(update): Json<PropertyUpdate>,
) -> Result<ApiResponse<PropertyData>, ApiError> {
    let property = state
        .property_service
        .update(&id, user.id(), update)
        .await?;

    Ok(ApiResponse::ok(PropertyData { property }).with_message("Property updated successfully"))
}

/// DELETE /api/properties/{id}
pub async fn delete_property(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state.property_service.delete(&id, user.id()).await?;
    Ok(ApiResponse::message("Property deleted successfully"))
}

pub fn create_properties_router(route_cache: Option<RouteCache>) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/my", get(list_my_properties))
        .route(
            "/{id}",
            get(get_property).put(update_property).delete(delete_property),
        );

    match route_cache {
        Some(route_cache) => router
            .route_layer(from_fn_with_state(route_cache.clone(), invalidate_routes))
            .route_layer(from_fn_with_state(route_cache, cache_response)),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = parse_list_query(&[]).unwrap();
        assert_eq!(query, PropertyListQuery::default());
    }

    #[test]
    fn test_full_query() {
        let query = parse_list_query(&params(&[
            ("type", "villa"),
            ("city", "Pune"),
            ("listingType", "rent"),
            ("furnished", "TRUE"),
            ("bedrooms", "3"),
            ("minPrice", "1000"),
            ("amenities", "Pool,Gym"),
            ("amenities", "garden"),
            ("page", "2"),
            ("limit", "20"),
            ("sortBy", "price"),
            ("sortOrder", "asc"),
            ("utm_source", "mail"),
        ]))
        .unwrap();

        let expected = PropertyFilter::new()
            .with_property_type(PropertyType::Villa)
            .with_city("pune")
            .with_listing_type(ListingType::Rent)
            .with_furnished(true)
            .with_bedrooms(3)
            .with_price(Some(1000.0), None)
            .with_amenities(["garden", "gym", "pool"]);

        assert_eq!(query.filter, expected);
        assert_eq!((query.page.page(), query.page.limit()), (2, 20));
        assert_eq!(query.sort_by, PropertySortField::Price);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_parameter_order_does_not_matter() {
        let a = parse_list_query(&params(&[("city", "Pune"), ("bedrooms", "2")])).unwrap();
        let b = parse_list_query(&params(&[("bedrooms", "2"), ("city", " PUNE ")])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_last_value_wins_and_blanks_are_ignored() {
        let query = parse_list_query(&params(&[
            ("city", "Mumbai"),
            ("city", "Pune"),
            ("state", ""),
        ]))
        .unwrap();

        assert_eq!(query.filter, PropertyFilter::new().with_city("pune"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for pair in [
            ("bedrooms", "two"),
            ("minPrice", "cheap"),
            ("type", "castle"),
            ("sortBy", "owner"),
            ("sortOrder", "up"),
            ("limit", "1000"),
            ("page", "0"),
        ] {
            let err = parse_list_query(&params(&[pair])).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "{:?}", pair);
        }
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        for pair in [
            ("minPrice", "NaN"),
            ("maxPrice", "inf"),
            ("minArea", "-infinity"),
            ("maxArea", "1e999"),
        ] {
            let err = parse_list_query(&params(&[pair])).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "{:?}", pair);
            assert!(err.message().contains(pair.0));
        }

        let query = parse_list_query(&params(&[("maxPrice", "1e6")])).unwrap();
        assert_eq!(query.filter, PropertyFilter::new().with_price(None, Some(1e6)));
    }
}
