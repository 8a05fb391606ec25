//! User account endpoints
//!
//! Account creation is public; all other operations require a valid
//! bearer token.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{User, UserId};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Request to create a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request to update a user; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUserApiRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// User response (safe to expose)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i64(),
            username: user.username().to_string(),
            full_name: user.full_name().to_string(),
            email: user.email().map(String::from),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// List users response
#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// Deletion confirmation
#[derive(Debug, Clone, Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, "Creating user");

    let user = state
        .user_service
        .create(CreateUserRequest {
            username: request.username,
            password: request.password,
            full_name: request.full_name,
            email: request.email,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!("Listing all users");

    let users = state.user_service.list().await.map_err(ApiError::from)?;

    let user_responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    let total = user_responses.len();

    Ok(Json(ListUsersResponse {
        users: user_responses,
        total,
    }))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = id, "Getting user");

    let user = state
        .user_service
        .get(UserId::new(id))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = id, "Updating user");

    let user = state
        .user_service
        .update(
            UserId::new(id),
            UpdateUserRequest {
                username: request.username,
                password: request.password,
                full_name: request.full_name,
                email: request.email,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    debug!(user_id = id, "Deleting user");

    let deleted = state
        .user_service
        .delete(UserId::new(id))
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!("User '{}' not found", id)));
    }

    Ok(Json(DeleteUserResponse {
        message: "User deleted successfully".to_string(),
    }))
}
