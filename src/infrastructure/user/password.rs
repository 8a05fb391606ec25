//! Password hashing utilities using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Cost parameters for password hashing
#[derive(Debug, Clone)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of iterations
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password with a fresh random salt
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2-based password hasher
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with the given cost parameters
    pub fn new(config: &HashingConfig) -> Result<Self, DomainError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| {
                DomainError::configuration(format!("Invalid password hashing parameters: {}", e))
            })?;

        Ok(Self { params })
    }

    /// Create a hasher with default cost parameters
    pub fn with_default_config() -> Self {
        Self {
            params: Params::default(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        // The stored hash embeds its own salt and cost parameters, so a
        // malformed hash and a wrong password both collapse to a mismatch.
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::with_default_config();
        let password = "my_secure_password";

        let hash = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_unique() {
        let hasher = Argon2Hasher::with_default_config();
        let password = "my_secure_password";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(hasher.verify(password, &hash1));
        assert!(hasher.verify(password, &hash2));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = Argon2Hasher::with_default_config();

        assert!(!hasher.verify("password", "invalid_hash_format"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_custom_cost_parameters() {
        let config = HashingConfig {
            memory_kib: 8192,
            iterations: 1,
            parallelism: 1,
        };
        let hasher = Argon2Hasher::new(&config).unwrap();

        let hash = hasher.hash("password123").unwrap();
        assert!(hasher.verify("password123", &hash));

        // Hashes made with different cost parameters still verify, since
        // the parameters are embedded in the hash string itself
        let default_hasher = Argon2Hasher::with_default_config();
        assert!(default_hasher.verify("password123", &hash));
    }

    #[test]
    fn test_invalid_cost_parameters() {
        let config = HashingConfig {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        };

        assert!(Argon2Hasher::new(&config).is_err());
    }

    #[test]
    fn test_empty_password() {
        let hasher = Argon2Hasher::with_default_config();
        let password = "";

        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash));
    }
}
