use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

use crate::util::error::{FieldError, HandlerError};

/// JSON body extractor that also runs the `validator` rules of `T`.
///
/// Both a body that does not parse and one that breaks a rule are answered
/// with a 400 validation error.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!("Rejected request body: {}", rejection.body_text());
            HandlerError::validation(vec![FieldError::new("body", rejection.body_text())])
        })?;
        value.validate().map_err(|errors| {
            warn!("Request body failed validation: {}", errors);
            HandlerError::from(errors)
        })?;
        Ok(ValidatedJson(value))
    }
}
