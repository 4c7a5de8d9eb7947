/*
 * Responsibility
 * - Json<T> + field validation in one extractor
 * - Unparsable body -> MalformedRequest, wrong shape -> Validation,
 *   failed field rules -> InvalidBody (first field message wins)
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, FieldErrors};

/// Field-level rules for a request body.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
                other => AppError::MalformedRequest(other.body_text()),
            })?;

        value.validate().map_err(AppError::InvalidBody)?;

        Ok(Self(value))
    }
}
