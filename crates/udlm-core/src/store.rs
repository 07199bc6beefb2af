//! The store traits.
//!
//! Implemented by storage backends (e.g. `udlm-store-sqlite`). The HTTP layer
//! depends on these abstractions, not on any concrete backend.

use std::future::Future;

use crate::{
  record::{OwnerId, RecordId, Resource},
  user::User,
};

// ─── Owned records ───────────────────────────────────────────────────────────

/// Create/read/update/delete over one resource type, scoped to an owner.
///
/// Every method filters by `owner`. A record owned by someone else behaves
/// exactly like a record that does not exist, so callers cannot probe for
/// other owners' ids.
///
/// `Self::Error` covers backend failures only; "not found" is expressed in the
/// return value.
pub trait OwnedStore<R: Resource>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every record owned by `owner`, in the resource's sort order.
  fn list(
    &self,
    owner: OwnerId,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Validate and persist a new record for `owner`, returning it with its
  /// store-assigned id.
  fn create(
    &self,
    owner: OwnerId,
    input: R::New,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Apply only the fields present in `patch`. Returns `None` if `owner` has
  /// no record `id`.
  fn update(
    &self,
    owner: OwnerId,
    id: RecordId,
    patch: R::Patch,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Permanently remove record `id`. Returns `false` if `owner` has no such
  /// record.
  fn delete(
    &self,
    owner: OwnerId,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// The identity table that owned records reference.
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a user. Returns `None` if `email` is already registered.
  fn add_user(
    &self,
    email: String,
    password_hash: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn find_user_by_email(
    &self,
    email: &str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send;
}
