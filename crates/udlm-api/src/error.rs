//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use udlm_core::ValidationErrors;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing, malformed or expired bearer token.
  #[error("not authenticated")]
  Unauthenticated,

  #[error("incorrect email or password")]
  InvalidCredentials,

  /// The record does not exist *or* belongs to someone else.
  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("validation failed: {0}")]
  Validation(#[from] ValidationErrors),

  /// The body parsed as JSON but did not fit the payload shape.
  #[error("{0}")]
  Unprocessable(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    match rejection {
      JsonRejection::JsonDataError(e) => Self::Unprocessable(e.body_text()),
      other => Self::BadRequest(other.body_text()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Unauthenticated | ApiError::InvalidCredentials => {
        tracing::debug!(error = %self, "rejected credentials");
        let mut res =
          (StatusCode::UNAUTHORIZED, Json(json!({ "error": self.to_string() })))
            .into_response();
        res
          .headers_mut()
          .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        return res;
      }
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
      ApiError::Validation(errs) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "error": "validation failed", "fields": errs }),
      ),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, json!({ "error": m })),
      ApiError::Store(_) | ApiError::Internal(_) => {
        tracing::error!(error = %self, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": "internal server error" }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
