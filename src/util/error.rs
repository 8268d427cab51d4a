use axum::{http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use tracing::error;
use validator::ValidationErrors;

use crate::repository::repository_error::RepositoryError;

pub const SERVER_ERROR_MSG: &str = "Erreur du serveur";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    DuplicateEmail,
    InvalidCredentials,
    Internal,
    Unauthorized,
    Forbidden,
}

impl HandlerErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation
            | HandlerErrorKind::DuplicateEmail
            | HandlerErrorKind::InvalidCredentials => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// One violated input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            msg: msg.into(),
        }
    }
}

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl HandlerError {
    pub fn new(error: HandlerErrorKind, message: impl Into<String>) -> Self {
        HandlerError {
            error,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: "Données invalides".to_string(),
            errors,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        (status, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn field(field: &str, msg: &str) -> Self {
        ServiceError::Validation(vec![FieldError::new(field, msg)])
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::AlreadyExists(_) => ServiceError::DuplicateEmail("Cet email est déjà utilisé".to_string()),
            err @ (RepositoryError::Rejected(_)
            | RepositoryError::Unavailable(_)
            | RepositoryError::Database(_)
            | RepositoryError::Serialization(_)) => ServiceError::InternalError(err.to_string()),
        }
    }
}

/// Centralized responder: service failures become HTTP errors.
impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HandlerError::validation(errors),
            ServiceError::DuplicateEmail(msg) => HandlerError::new(HandlerErrorKind::DuplicateEmail, msg),
            ServiceError::InvalidCredentials => {
                HandlerError::new(HandlerErrorKind::InvalidCredentials, "Identifiants invalides")
            }
            ServiceError::Unauthorized(msg) => HandlerError::new(HandlerErrorKind::Unauthorized, msg),
            ServiceError::Forbidden(msg) => HandlerError::new(HandlerErrorKind::Forbidden, msg),
            ServiceError::NotFound(msg) => HandlerError::new(HandlerErrorKind::NotFound, msg),
            ServiceError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                HandlerError::new(HandlerErrorKind::Internal, SERVER_ERROR_MSG)
            }
        }
    }
}

impl From<ValidationErrors> for HandlerError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Champ invalide: {}", field));
                    FieldError::new(camel_case(&field), msg)
                })
            })
            .collect();
        // HashMap order is unstable; keep responses deterministic.
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        HandlerError::validation(fields)
    }
}

/// Request fields are `snake_case` in Rust and `camelCase` on the wire.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
