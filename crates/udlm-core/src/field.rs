//! [`Field`] — a tri-state wrapper for sparse (partial) update payloads.
//!
//! A plain `Option<T>` cannot tell "key omitted" from "key sent as `null`".
//! Patch shapes wrap every field in [`Field`] and mark the container
//! `#[serde(default)]`, so omitted keys become [`Field::Absent`].

use serde::{Deserialize, Deserializer};

/// One field of a partial-update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
  /// The key was not present; the stored value is left untouched.
  #[default]
  Absent,
  /// The key was present with an explicit `null`.
  Null,
  /// The key was present with a value.
  Value(T),
}

impl<T> Field<T> {
  pub fn is_absent(&self) -> bool { matches!(self, Self::Absent) }

  pub fn is_null(&self) -> bool { matches!(self, Self::Null) }

  /// The carried value, if any.
  pub fn value(&self) -> Option<&T> {
    match self {
      Self::Value(v) => Some(v),
      Self::Absent | Self::Null => None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
    match self {
      Self::Absent => Field::Absent,
      Self::Null => Field::Null,
      Self::Value(v) => Field::Value(f(v)),
    }
  }

  /// `None` when absent, `Some(None)` for an explicit null.
  pub fn into_update(self) -> Option<Option<T>> {
    match self {
      Self::Absent => None,
      Self::Null => Some(None),
      Self::Value(v) => Some(Some(v)),
    }
  }
}

impl<T> From<T> for Field<T> {
  fn from(value: T) -> Self { Self::Value(value) }
}

// Only reached when the key is present; `#[serde(default)]` covers omission.
impl<'de, T> Deserialize<'de> for Field<T>
where
  T: Deserialize<'de>,
{
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(match Option::<T>::deserialize(deserializer)? {
      Some(v) => Self::Value(v),
      None => Self::Null,
    })
  }
}
