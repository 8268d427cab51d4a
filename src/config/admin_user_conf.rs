use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

use crate::config::ConfigError;

/// Bootstrap "Président" account created on first start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminUserConfig {
    /// Returns `Ok(None)` when `ADMIN_EMAIL` is unset; once it is set the
    /// name and password become mandatory.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(email) = env::var("ADMIN_EMAIL") else {
            info!("ADMIN_EMAIL not set, no bootstrap account will be created");
            return Ok(None);
        };
        let name = env::var("ADMIN_NAME").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_NAME".to_string()))?;
        let password =
            env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD".to_string()))?;
        if password.len() < 6 {
            return Err(ConfigError::ValidationError(
                "ADMIN_PASSWORD must be at least 6 characters long".to_string(),
            ));
        }
        Ok(Some(AdminUserConfig { name, email, password }))
    }
}
