use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::model::role::Role;

/// Identity carried by the token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenUser {
    pub id: String,
    pub role: Role,
}

/// JWT token claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user: TokenUser,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Missing or malformed authorization header")]
    MissingToken,
}

pub trait JwtTokenUtils {
    fn generate_token(&self, user_id: &str, role: Role) -> Result<String, JwtError>;
    fn validate_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        encode(&header, claims, &encoding_key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn generate_token(&self, user_id: &str, role: Role) -> Result<String, JwtError> {
        debug!("Generating token for user: {} with role: {}", user_id, role);

        let now = Utc::now();
        let lifetime = Duration::try_minutes(self.jwt_config.expiration_minutes).ok_or_else(|| {
            JwtError::EncodingFailed(format!(
                "token lifetime of {} minutes is out of range",
                self.jwt_config.expiration_minutes
            ))
        })?;
        let expiration = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| JwtError::EncodingFailed("token expiry overflows the calendar".to_string()))?;
        let claims = Claims {
            user: TokenUser {
                id: user_id.to_string(),
                role,
            },
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = self.sign(&claims)?;
        info!("Successfully generated token for user: {}", user_id);
        Ok(token)
    }

    fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                let claims = token_data.claims;
                if claims.exp < Utc::now().timestamp() {
                    warn!("Token has expired for user: {}", claims.user.id);
                    return Err(JwtError::TokenExpired);
                }
                debug!("Token validation successful for user: {}", claims.user.id);
                Ok(claims)
            }
            Err(err) => {
                warn!("Failed to decode JWT token: {}", err);
                match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(JwtError::TokenExpired),
                    _ => Err(JwtError::DecodingFailed(err.to_string())),
                }
            }
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(JwtError::MissingToken)?;
        Ok(token.to_string())
    }
}
