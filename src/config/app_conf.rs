use std::env;
use tracing::debug;

use crate::config::{parse_env_or, ConfigError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// `APP_HOST` (default `0.0.0.0`) and `APP_PORT` (default `5000`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env_or("APP_PORT", 5000u16)?;
        debug!("Listening address configured as {}:{}", host, port);
        Ok(AppConfig { host, port })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}
