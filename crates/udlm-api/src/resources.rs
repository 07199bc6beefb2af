//! Generic handlers for owner-scoped resource collections.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/<collection>/`  | Every record the caller owns, in sort order |
//! | `POST`   | `/<collection>/`  | Body: creation payload; returns 201 + record |
//! | `PUT`    | `/<collection>/{id}` | Body: sparse patch; 404 if not the caller's |
//! | `DELETE` | `/<collection>/{id}` | 204; 404 if not the caller's |
//!
//! The collection routes are also served without the trailing slash.

use axum::{
  Json, Router,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  routing::{get, put},
};
use udlm_core::{RecordId, Resource, store::OwnedStore};

use crate::{ApiState, auth::Owner, error::ApiError, payload::Validated};

/// Register the four routes for resource `R` on `router`.
pub fn mount<S, R>(router: Router<ApiState<S>>) -> Router<ApiState<S>>
where
  S: OwnedStore<R> + 'static,
  R: Resource,
{
  let base = format!("/{}", R::COLLECTION);
  let collection = || get(list::<S, R>).post(create::<S, R>);
  router
    .route(&base, collection())
    .route(&format!("{base}/"), collection())
    .route(
      &format!("{base}/{{id}}"),
      put(update::<S, R>).delete(delete::<S, R>),
    )
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /<collection>/`
pub async fn list<S, R>(
  State(state): State<ApiState<S>>,
  owner: Owner,
) -> Result<Json<Vec<R>>, ApiError>
where
  S: OwnedStore<R>,
  R: Resource,
{
  let records = state.store.list(owner.id()).await.map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /<collection>/` — returns 201 + the stored record.
pub async fn create<S, R>(
  State(state): State<ApiState<S>>,
  owner: Owner,
  Validated(input): Validated<R::New>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OwnedStore<R>,
  R: Resource,
{
  let record = state
    .store
    .create(owner.id(), input)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(
    resource = R::NAME,
    id = record.id(),
    owner = %record.owner(),
    "created record"
  );
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /<collection>/{id}` — applies only the fields present in the body.
pub async fn update<S, R>(
  State(state): State<ApiState<S>>,
  owner: Owner,
  Path(id): Path<RecordId>,
  Validated(patch): Validated<R::Patch>,
) -> Result<Json<R>, ApiError>
where
  S: OwnedStore<R>,
  R: Resource,
{
  let record = state
    .store
    .update(owner.id(), id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(R::NAME))?;
  tracing::debug!(resource = R::NAME, id = record.id(), "updated record");
  Ok(Json(record))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /<collection>/{id}`
pub async fn delete<S, R>(
  State(state): State<ApiState<S>>,
  owner: Owner,
  Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError>
where
  S: OwnedStore<R>,
  R: Resource,
{
  let removed = state
    .store
    .delete(owner.id(), id)
    .await
    .map_err(ApiError::store)?;
  if removed {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(R::NAME))
  }
}
