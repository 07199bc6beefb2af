//! Owned records — the shape every resource type shares.
//!
//! A record belongs to exactly one owner. The owner is injected by the
//! server from the authenticated caller and is never read from a payload.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, validate::Validate};

/// Store-assigned primary key of an owned record.
pub type RecordId = i64;

/// The identity that owns a record — the primary key of a user.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OwnerId(i64);

impl OwnerId {
  pub const fn new(id: i64) -> Self { Self(id) }

  pub const fn get(self) -> i64 { self.0 }
}

impl fmt::Display for OwnerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl FromStr for OwnerId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse::<i64>()
      .map(Self)
      .map_err(|_| Error::InvalidOwner(s.to_owned()))
  }
}

/// A resource type whose records are scoped to a single owner.
///
/// `Self` is the materialised output shape. [`Resource::New`] is the creation
/// payload and [`Resource::Patch`] the sparse update payload.
pub trait Resource:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  type New: Validate + DeserializeOwned + Send + 'static;
  type Patch: Validate + DeserializeOwned + Send + 'static;

  /// Singular, human-readable name used in messages (e.g. `"subscription"`).
  const NAME: &'static str;

  /// URL collection segment (e.g. `"subscriptions"`).
  const COLLECTION: &'static str;

  fn id(&self) -> RecordId;

  fn owner(&self) -> OwnerId;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn owner_id_parses_integers_only() {
    assert_eq!("42".parse::<OwnerId>().unwrap(), OwnerId::new(42));
    assert!(matches!("abc".parse::<OwnerId>(), Err(Error::InvalidOwner(s)) if s == "abc"));
    assert!("".parse::<OwnerId>().is_err());
  }

  #[test]
  fn owner_id_serialises_as_bare_integer() {
    let json = serde_json::to_string(&OwnerId::new(7)).unwrap();
    assert_eq!(json, "7");
  }
}
