//! [`Validated`] — the decode-validate boundary for request bodies.

use axum::{
  Json,
  extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use udlm_core::Validate;

use crate::error::ApiError;

/// A JSON body that decoded into `T` and passed [`Validate::validate`].
///
/// Decoder failures become [`ApiError::Unprocessable`] (wrong shape) or
/// [`ApiError::BadRequest`] (not JSON); constraint failures become
/// [`ApiError::Validation`] with one entry per offending field.
#[derive(Debug)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
  S: Send + Sync,
  T: DeserializeOwned + Validate,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state).await?;
    value.validate()?;
    Ok(Self(value))
  }
}
