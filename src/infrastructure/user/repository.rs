//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    /// Index for username -> user ID lookup
    username_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            username_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id.as_i64()).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let username_index = self.username_index.read().await;

        if let Some(user_id) = username_index.get(username) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;

        if username_index.contains_key(&user.username) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(
            UserId::new(id),
            user.username,
            user.password_hash,
            user.full_name,
            user.email,
        );

        username_index.insert(user.username().to_string(), id);
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;

        let id = user.id().as_i64();

        let old_user = users
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user.id())))?;

        // If the username changed, check uniqueness and update the index
        let old_username = old_user.username().to_string();
        let new_username = user.username().to_string();

        if old_username != new_username {
            if username_index.contains_key(&new_username) {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    new_username
                )));
            }

            username_index.remove(&old_username);
            username_index.insert(new_username, id);
        }

        users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;

        if let Some(user) = users.remove(&id.as_i64()) {
            username_index.remove(user.username());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by_key(|u| u.id().as_i64());

        Ok(result)
    }
}
