use serde::Deserialize;

use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Authentication configuration
///
/// `jwt_secret` has no usable default: an empty value fails validation at
/// startup instead of degrading into a known signing key.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    pub token_expiration_hours: u64,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend: "memory" or "postgres"
    pub backend: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiration_hours: 24,
            hash_memory_kib: argon2::Params::DEFAULT_M_COST,
            hash_iterations: argon2::Params::DEFAULT_T_COST,
            hash_parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate startup-critical settings
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(DomainError::configuration(
                "auth.jwt_secret is required (set APP__AUTH__JWT_SECRET); \
                 refusing to start without a signing secret",
            ));
        }

        if self.auth.token_expiration_hours == 0 {
            return Err(DomainError::configuration(
                "auth.token_expiration_hours must be greater than zero",
            ));
        }

        match self.storage.backend.as_str() {
            "memory" | "postgres" => Ok(()),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'. Use 'memory' or 'postgres'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> AppConfig {
        AppConfig {
            auth: AuthConfig {
                jwt_secret: secret.to_string(),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.auth.token_expiration_hours, 24);
        assert_eq!(config.storage.backend, "memory");
    }

    #[test]
    fn test_missing_secret_fails_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());

        let config = config_with_secret("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config_passes() {
        let config = config_with_secret("a-real-secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_expiration_rejected() {
        let mut config = config_with_secret("a-real-secret");
        config.auth.token_expiration_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let mut config = config_with_secret("a-real-secret");
        config.storage.backend = "mysql".to_string();
        assert!(config.validate().is_err());
    }
}
