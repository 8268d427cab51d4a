use std::env;
use tracing::{debug, error, info, warn};

use crate::config::{parse_env_or, ConfigError};

const MIN_SECRET_LEN: usize = 32;
/// One year.
const MAX_EXPIRATION_MINUTES: i64 = 525_600;
const DEFAULT_SECRET: &str = "association_backend_development_secret_change_me_in_production";

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Session token lifetime in minutes
    pub expiration_minutes: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (falls back to a development secret)
    /// - JWT_EXPIRY_MINUTES: Token lifetime in minutes (defaults to 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using the built-in development secret");
            DEFAULT_SECRET.to_string()
        });
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let expiration_minutes = parse_env_or("JWT_EXPIRY_MINUTES", 60i64)?;

        let config = JwtConfig {
            jwt_secret,
            expiration_minutes,
        };
        config.validate()?;
        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            error!("JWT secret is too short (minimum {} characters required)", MIN_SECRET_LEN);
            return Err(ConfigError::ValidationError(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }

        if self.expiration_minutes <= 0 {
            error!("Token expiration must be greater than 0");
            return Err(ConfigError::ValidationError("Token expiration must be greater than 0".to_string()));
        }

        if self.expiration_minutes > MAX_EXPIRATION_MINUTES {
            error!("Token expiration exceeds {} minutes", MAX_EXPIRATION_MINUTES);
            return Err(ConfigError::ValidationError(format!(
                "Token expiration must not exceed {} minutes",
                MAX_EXPIRATION_MINUTES
            )));
        }
        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: DEFAULT_SECRET.to_string(),
            expiration_minutes: 60,
        }
    }
}
