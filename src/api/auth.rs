//! Authentication endpoints
//!
//! Login issues a signed bearer token; /me reports the identity bound to
//! a presented token.

use axum::extract::State;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::users::UserResponse;

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

/// Current-user response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
}

/// Login with username and password
///
/// POST /login
///
/// Returns a signed bearer token on successful authentication. A missing
/// user and a wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    debug!(user_id = %user.id(), "Login succeeded, issuing token");

    // A signing failure is a server error, never "invalid credentials"
    let token = state
        .jwt_service
        .issue(user.id(), user.username())
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let expires_at = Utc::now() + Duration::hours(state.jwt_service.expiration_hours() as i64);

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(&user),
        expires_at: expires_at.to_rfc3339(),
    }))
}

/// Get the identity bound to the presented token
///
/// GET /me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<MeResponse>, ApiError> {
    Ok(Json(MeResponse {
        id: user.user_id.as_i64(),
        username: user.username,
    }))
}
