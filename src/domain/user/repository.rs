//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// A user record ready to persist, before the store has assigned an id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: Option<String>,
}

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username (for login)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with its assigned ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user, returning whether a record was removed
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock user repository for testing
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<HashMap<i64, User>>>,
        next_id: AtomicI64,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self {
                users: Arc::new(RwLock::new(HashMap::new())),
                next_id: AtomicI64::new(1),
                should_fail: Arc::new(RwLock::new(false)),
            }
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.get(&id.as_i64()).cloned())
        }

        async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.username() == username).cloned())
        }

        async fn create(&self, user: NewUser) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if users.values().any(|u| u.username() == user.username) {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username
                )));
            }

            let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let user = User::new(
                id,
                user.username,
                user.password_hash,
                user.full_name,
                user.email,
            );

            users.insert(id.as_i64(), user.clone());
            Ok(user)
        }

        async fn update(&self, user: &User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            let id = user.id().as_i64();

            if !users.contains_key(&id) {
                return Err(DomainError::not_found(format!(
                    "User '{}' not found",
                    user.id()
                )));
            }

            // Check username uniqueness (exclude current user)
            let username_taken = users
                .values()
                .any(|u| u.username() == user.username() && u.id().as_i64() != id);

            if username_taken {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username()
                )));
            }

            users.insert(id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;
            Ok(users.remove(&id.as_i64()).is_some())
        }

        async fn list(&self) -> Result<Vec<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;

            let mut result: Vec<User> = users.values().cloned().collect();
            result.sort_by_key(|u| u.id().as_i64());

            Ok(result)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn new_user(username: &str) -> NewUser {
            NewUser {
                username: username.to_string(),
                password_hash: "hashed_password".to_string(),
                full_name: "Test User".to_string(),
                email: None,
            }
        }

        #[tokio::test]
        async fn test_create_and_get() {
            let repo = MockUserRepository::new();

            let created = repo.create(new_user("testuser")).await.unwrap();

            let retrieved = repo.get(created.id()).await.unwrap();
            assert!(retrieved.is_some());
            assert_eq!(retrieved.unwrap().username(), "testuser");
        }

        #[tokio::test]
        async fn test_ids_are_assigned_sequentially() {
            let repo = MockUserRepository::new();

            let first = repo.create(new_user("user1")).await.unwrap();
            let second = repo.create(new_user("user2")).await.unwrap();

            assert!(second.id().as_i64() > first.id().as_i64());
        }

        #[tokio::test]
        async fn test_get_by_username() {
            let repo = MockUserRepository::new();

            let created = repo.create(new_user("testuser")).await.unwrap();

            let retrieved = repo.get_by_username("testuser").await.unwrap();
            assert!(retrieved.is_some());
            assert_eq!(retrieved.unwrap().id(), created.id());
        }

        #[tokio::test]
        async fn test_username_uniqueness() {
            let repo = MockUserRepository::new();

            repo.create(new_user("testuser")).await.unwrap();

            let result = repo.create(new_user("testuser")).await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_update() {
            let repo = MockUserRepository::new();

            let mut user = repo.create(new_user("testuser")).await.unwrap();

            user.set_username("newusername");
            repo.update(&user).await.unwrap();

            let retrieved = repo.get(user.id()).await.unwrap().unwrap();
            assert_eq!(retrieved.username(), "newusername");
        }

        #[tokio::test]
        async fn test_delete() {
            let repo = MockUserRepository::new();

            let user = repo.create(new_user("testuser")).await.unwrap();

            let deleted = repo.delete(user.id()).await.unwrap();
            assert!(deleted);

            let retrieved = repo.get(user.id()).await.unwrap();
            assert!(retrieved.is_none());
        }

        #[tokio::test]
        async fn test_delete_missing_user() {
            let repo = MockUserRepository::new();

            let deleted = repo.delete(UserId::new(99)).await.unwrap();
            assert!(!deleted);
        }

        #[tokio::test]
        async fn test_list() {
            let repo = MockUserRepository::new();

            repo.create(new_user("user1")).await.unwrap();
            repo.create(new_user("user2")).await.unwrap();

            let all = repo.list().await.unwrap();
            assert_eq!(all.len(), 2);
            assert_eq!(all[0].username(), "user1");
        }

        #[tokio::test]
        async fn test_configured_failure_propagates() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.get_by_username("anyone").await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }
}
