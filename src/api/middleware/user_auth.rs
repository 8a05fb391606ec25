//! Bearer-token authentication middleware

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::UserId;

/// Identity recovered from a validated token
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Extractor that requires a valid bearer token
///
/// The token is self-contained: the claims alone establish the caller's
/// identity, no store lookup happens here.
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthedUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("Authorization header required"))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Bearer token required"))?;

        // No token presented is a distinct state from an invalid token
        let token = extract_bearer_token(auth_str)
            .ok_or_else(|| ApiError::unauthorized("Bearer token required"))?;

        debug!("Validating bearer token");

        let claims = state.jwt_service.validate(token).map_err(ApiError::from)?;

        Ok(RequireUser(AuthedUser {
            user_id: claims.user_id(),
            username: claims.username,
        }))
    }
}

/// Extract the token from an Authorization header value
///
/// Recognizes only the exact prefix "Bearer " (case-sensitive, single
/// space); anything else yields None.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
}
