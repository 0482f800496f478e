//! Property recommendations between users

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{parse_param, ApiError, ApiResponse, Json, PageParams};
use crate::domain::pagination::{Page, Pagination};
use crate::domain::recommendation::RecommendationScope;
use crate::infrastructure::recommendation::{RecommendationView, SendRecommendation};

#[derive(Debug, Serialize)]
pub struct RecommendationListData {
    pub recommendations: Vec<RecommendationView>,
    pub pagination: Pagination,
}

impl From<Page<RecommendationView>> for RecommendationListData {
    fn from(page: Page<RecommendationView>) -> Self {
        Self {
            recommendations: page.items,
            pagination: page.pagination,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationData {
    pub recommendation: RecommendationView,
}

/// `?page=&limit=&unreadOnly=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub unread_only: Option<String>,
}

impl ReceivedParams {
    fn scope(&self) -> Result<RecommendationScope, ApiError> {
        let unread_only = match self.unread_only.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(value) => parse_param("unreadOnly", &value.to_lowercase())?,
        };
        Ok(RecommendationScope::Received { unread_only })
    }

    fn page(&self) -> PageParams {
        PageParams {
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
    }
}

/// POST /api/recommendations
pub async fn send_recommendation(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<SendRecommendation>,
) -> Result<(StatusCode, ApiResponse<RecommendationData>), ApiError> {
    let recommendation = state
        .recommendation_service
        .send(user.id(), request)
        .await?;

    let message = match &recommendation.recommended_to {
        Some(recipient) => format!("Property recommendation sent to {}", recipient.email),
        None => "Property recommendation sent".to_string(),
    };

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(RecommendationData { recommendation }).with_message(message),
    ))
}

/// GET /api/recommendations/received
pub async fn list_received(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<ReceivedParams>,
) -> Result<ApiResponse<RecommendationListData>, ApiError> {
    let scope = params.scope()?;
    let page = params.page().to_page_request()?;

    let page = state
        .recommendation_service
        .list(user.id(), scope, &page)
        .await?;
    Ok(ApiResponse::ok(page.into()))
}

/// GET /api/recommendations/sent
pub async fn list_sent(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<PageParams>,
) -> Result<ApiResponse<RecommendationListData>, ApiError> {
    let page = params.to_page_request()?;

    let page = state
        .recommendation_service
        .list(user.id(), RecommendationScope::Sent, &page)
        .await?;
    Ok(ApiResponse::ok(page.into()))
}

/// PATCH /api/recommendations/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<RecommendationData>, ApiError> {
    let recommendation = state
        .recommendation_service
        .mark_read(&id, user.id())
        .await?;

    Ok(ApiResponse::ok(RecommendationData { recommendation })
        .with_message("Recommendation marked as read"))
}

/// DELETE /api/recommendations/{id}
pub async fn delete_recommendation(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    state
        .recommendation_service
        .delete(&id, user.id())
        .await?;

    Ok(ApiResponse::message("Recommendation deleted successfully"))
}

pub fn create_recommendations_router() -> Router<AppState> {
    Router::new()
        .route("/", post(send_recommendation))
        .route("/received", get(list_received))
        .route("/sent", get(list_sent))
        .route("/{id}/read", patch(mark_read))
        .route("/{id}", delete(delete_recommendation))
}
