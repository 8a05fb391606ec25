//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::domain::{DomainError, User, UserId};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::user::{
    CreateUserRequest, PasswordHasher, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        UserService::authenticate(self, username, password).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        UserService::delete(self, id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            user_service,
            jwt_service,
        }
    }
}
