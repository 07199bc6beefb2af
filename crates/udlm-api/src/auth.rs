//! Bearer-token issuance, verification and the [`Owner`] extractor.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the user id. Handlers never see
//! the raw credential, only the resolved [`OwnerId`].

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use udlm_core::OwnerId;

use crate::{ApiState, error::ApiError};

// ─── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  sub: String,
  iat: i64,
  exp: i64,
}

/// A freshly signed access token.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
  pub access_token: String,
  pub token_type:   &'static str,
  /// Lifetime in seconds.
  pub expires_in:   i64,
}

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_MINUTES: i64 = 365 * 24 * 60;

/// Signing and verification keys plus the token lifetime.
pub struct TokenKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl:      Duration,
}

impl TokenKeys {
  /// `ttl_minutes` is clamped to `1..=MAX_TOKEN_MINUTES`.
  pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      ttl:      Duration::minutes(ttl_minutes.clamp(1, MAX_TOKEN_MINUTES)),
    }
  }

  pub fn issue(&self, owner: OwnerId) -> Result<AccessToken, ApiError> {
    self.issue_at(owner, Utc::now())
  }

  fn issue_at(&self, owner: OwnerId, now: DateTime<Utc>) -> Result<AccessToken, ApiError> {
    let expires = now
      .checked_add_signed(self.ttl)
      .ok_or_else(|| ApiError::Internal("token expiry out of range".into()))?;
    let claims = Claims {
      sub: owner.to_string(),
      iat: now.timestamp(),
      exp: expires.timestamp(),
    };
    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
      .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))?;
    Ok(AccessToken {
      access_token: token,
      token_type:   "bearer",
      expires_in:   self.ttl.num_seconds(),
    })
  }

  /// Check signature and expiry, then resolve the owner.
  pub fn verify(&self, token: &str) -> Result<OwnerId, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
      token,
      &self.decoding,
      &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
      tracing::debug!(error = %e, "token rejected");
      ApiError::Unauthenticated
    })?;
    data.claims.sub.parse().map_err(|_| ApiError::Unauthenticated)
  }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  let value = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthenticated)?;
  let (scheme, token) = value.split_once(' ').ok_or(ApiError::Unauthenticated)?;
  if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
    return Err(ApiError::Unauthenticated);
  }
  Ok(token.trim())
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The authenticated caller. Present in a handler means the request carried a
/// valid bearer token; rejection happens before any body parsing or store
/// access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub OwnerId);

impl Owner {
  pub fn id(self) -> OwnerId { self.0 }
}

impl<S> FromRequestParts<ApiState<S>> for Owner
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &ApiState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)?;
    state.tokens.verify(token).map(Owner)
  }
}

// ─── Passwords ───────────────────────────────────────────────────────────────

/// argon2id PHC string for `password` with a random salt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
}

pub fn verify_password(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc)
    .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
    .is_ok()
}
