//! User service for authentication and account management

use std::sync::Arc;

use crate::domain::user::{
    validate_full_name, validate_password, validate_username, NewUser, User, UserId,
    UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: Option<String>,
}

/// Request for updating a user; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// User service for authentication and management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_full_name(&request.full_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        // Check if username already exists
        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        // Hash the password; the plaintext is dropped with the request
        let password_hash = self.hasher.hash(&request.password)?;

        self.repository
            .create(NewUser {
                username: request.username,
                password_hash,
                full_name: request.full_name,
                email: request.email,
            })
            .await
    }

    /// Authenticate a user with username and password
    ///
    /// An unknown username and a wrong password are indistinguishable to
    /// the caller: both return None.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.get_by_username(username).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Apply a partial update to a user
    pub async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        if let Some(username) = request.username {
            validate_username(&username).map_err(|e| DomainError::validation(e.to_string()))?;
            user.set_username(username);
        }

        if let Some(full_name) = request.full_name {
            validate_full_name(&full_name).map_err(|e| DomainError::validation(e.to_string()))?;
            user.set_full_name(full_name);
        }

        if let Some(email) = request.email {
            user.set_email(Some(email));
        }

        if let Some(password) = request.password {
            validate_password(&password).map_err(|e| DomainError::validation(e.to_string()))?;

            // Replace the stored hash wholesale
            let new_hash = self.hasher.hash(&password)?;
            user.set_password_hash(new_hash);
        }

        self.repository.update(&user).await
    }

    /// Delete a user, returning whether a record was removed
    pub async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }
}
