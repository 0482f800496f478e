//! Account endpoints - registration, login and lookups

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::user::{Credentials, Registration, User, UserId};
use crate::infrastructure::user::UserSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
}

impl From<&User> for AccountData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            is_verified: user.is_verified(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionData {
    pub user: AccountData,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UserData<T> {
    pub user: T,
}

#[derive(Debug, Deserialize)]
pub struct FindUserParams {
    pub email: Option<String>,
}

fn session(state: &AppState, user: &User) -> Result<SessionData, ApiError> {
    let token = state.jwt_service.generate(&user.to_authenticated())?;
    Ok(SessionData {
        user: user.into(),
        token,
    })
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, ApiResponse<SessionData>), ApiError> {
    let user = state.user_service.register(registration).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(session(&state, &user)?).with_message("User registered successfully"),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<ApiResponse<SessionData>, ApiError> {
    let user = state.user_service.login(&credentials).await?;

    Ok(ApiResponse::ok(session(&state, &user)?).with_message("Login successful"))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
) -> Result<ApiResponse<UserData<ProfileData>>, ApiError> {
    // a valid token may outlive its account
    let user = state
        .user_service
        .get(caller.id())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid token or expired token."))?;

    Ok(ApiResponse::ok(UserData {
        user: ProfileData {
            id: user.id().clone(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            is_verified: user.is_verified(),
            created_at: user.created_at(),
        },
    }))
}

/// GET /api/auth/find-user?email=
pub async fn find_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Query(params): Query<FindUserParams>,
) -> Result<ApiResponse<UserData<UserSummary>>, ApiError> {
    let email = params
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    let user = state
        .user_service
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    Ok(ApiResponse::ok(UserData {
        user: UserSummary::from(&user),
    }))
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .route("/find-user", get(find_user))
}
