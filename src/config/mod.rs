pub mod jwt_conf;
pub mod mongo_conf;
pub mod admin_user_conf;
pub mod app_conf;

pub use admin_user_conf::AdminUserConfig;
pub use app_conf::AppConfig;
pub use jwt_conf::JwtConfig;
pub use mongo_conf::MongoConfig;

use tracing::info;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Every setting the application needs, loaded once at startup and handed
/// out by reference.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub app: AppConfig,
    pub mongo: MongoConfig,
    pub jwt: JwtConfig,
    pub admin: Option<AdminUserConfig>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading application settings");
        let app = AppConfig::from_env()?;
        let mongo = MongoConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let admin = AdminUserConfig::from_env()?;
        Ok(Settings { app, mongo, jwt, admin })
    }
}

/// Read an optional numeric variable, falling back to `default` when unset.
pub(crate) fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("Invalid {} value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
