//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Body: `{"email":..., "password":...}`; 201 + user, 409 if taken |
//! | `POST` | `/auth/login` | Same body; returns a bearer token, 401 on bad credentials |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use udlm_core::{
  Validate, ValidationErrors,
  store::UserStore,
  user::{is_plausible_email, normalize_email},
};

use crate::{
  ApiState,
  auth::{AccessToken, hash_password, verify_password},
  error::ApiError,
  payload::Validated,
};

pub const MIN_PASSWORD_LEN: usize = 8;

// ─── Register ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub email:    String,
  pub password: String,
}

impl Validate for RegisterBody {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    if !is_plausible_email(&normalize_email(&self.email)) {
      errs.push("email", "must be an email address");
    }
    if self.password.chars().count() < MIN_PASSWORD_LEN {
      errs.push(
        "password",
        format!("must be at least {MIN_PASSWORD_LEN} characters"),
      );
    }
    errs.finish()
  }
}

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<ApiState<S>>,
  Validated(body): Validated<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore,
{
  let email = normalize_email(&body.email);
  let password = body.password;
  let hash = tokio::task::spawn_blocking(move || hash_password(&password))
    .await
    .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))??;

  let user = state
    .store
    .add_user(email, hash)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::Conflict("email already registered".into()))?;

  tracing::info!(user_id = %user.id, "registered user");
  Ok((StatusCode::CREATED, Json(user)))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

impl Validate for LoginBody {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    errs.non_empty("email", &self.email);
    if self.password.is_empty() {
      errs.push("password", "must not be empty");
    }
    errs.finish()
  }
}

/// `POST /auth/login`
pub async fn login<S>(
  State(state): State<ApiState<S>>,
  Validated(body): Validated<LoginBody>,
) -> Result<Json<AccessToken>, ApiError>
where
  S: UserStore,
{
  let user = state
    .store
    .find_user_by_email(&normalize_email(&body.email))
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::InvalidCredentials)?;

  let password = body.password;
  let phc = user.password_hash.clone();
  let ok = tokio::task::spawn_blocking(move || verify_password(&password, &phc))
    .await
    .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?;
  if !ok {
    return Err(ApiError::InvalidCredentials);
  }

  Ok(Json(state.tokens.issue(user.id)?))
}
