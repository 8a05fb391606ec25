//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw store-assigned id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity for authentication and account management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Username for login
    username: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Display name
    full_name: String,
    /// Contact email, optional
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct a user from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        username: String,
        password_hash: String,
        full_name: String,
        email: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            full_name,
            email,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the username
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.touch();
    }

    /// Replace the password hash wholesale
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Update the display name
    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
        self.touch();
    }

    /// Update the contact email
    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
