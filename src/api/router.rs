use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Login and account creation are public; the remaining user
        // operations enforce a bearer token per-handler via RequireUser
        .route("/login", post(auth::login))
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/me", get(auth::get_current_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
