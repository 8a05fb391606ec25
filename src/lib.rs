//! Account API
//!
//! A small HTTP service for user account management with:
//! - Password-based login issuing signed, time-limited bearer tokens
//! - Argon2 password hashing with configurable cost
//! - Token-guarded user CRUD endpoints
//! - In-memory or PostgreSQL user storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::user::{
    Argon2Hasher, HashingConfig, InMemoryUserRepository, PostgresUserRepository, UserService,
};

/// Create the application state from validated configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(
        Argon2Hasher::new(&HashingConfig {
            memory_kib: config.auth.hash_memory_kib,
            iterations: config.auth.hash_iterations,
            parallelism: config.auth.hash_parallelism,
        })
        .map_err(|e| anyhow::anyhow!(e.to_string()))?,
    );

    let jwt_service = Arc::new(
        JwtService::new(JwtConfig::new(
            config.auth.jwt_secret.clone(),
            config.auth.token_expiration_hours,
        ))
        .map_err(|e| anyhow::anyhow!(e.to_string()))?,
    );

    let user_service: Arc<dyn api::state::UserServiceTrait> =
        match config.storage.backend.as_str() {
            "postgres" => {
                let database_url = std::env::var("DATABASE_URL").map_err(|_| {
                    anyhow::anyhow!(
                        "DATABASE_URL environment variable is required for the postgres backend"
                    )
                })?;

                info!("Connecting to PostgreSQL...");
                let pool = sqlx::PgPool::connect(&database_url)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
                info!("PostgreSQL connection established");

                let repository = PostgresUserRepository::new(pool);
                repository
                    .ensure_schema()
                    .await
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;

                Arc::new(UserService::new(Arc::new(repository), hasher))
            }
            _ => {
                info!("Using in-memory user storage");
                Arc::new(UserService::new(
                    Arc::new(InMemoryUserRepository::new()),
                    hasher,
                ))
            }
        };

    Ok(AppState::new(user_service, jwt_service))
}
