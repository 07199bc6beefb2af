//! Field-level validation for create and patch payloads.
//!
//! Decoding (serde) guarantees shape and types; [`Validate`] covers the
//! remaining constraints: non-nullable columns cannot be patched to `null`,
//! numeric ranges, and the few strings that must not be empty.
//!
//! An explicitly sent empty string is a value like any other unless the
//! field says otherwise.

use std::fmt;

use serde::Serialize;

use crate::field::Field;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

/// Every constraint a payload violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  pub fn new() -> Self { Self::default() }

  pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.push(FieldError { field, message: message.into() });
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn errors(&self) -> &[FieldError] { &self.0 }

  /// Whether `field` has at least one recorded error.
  pub fn has(&self, field: &str) -> bool {
    self.0.iter().any(|e| e.field == field)
  }

  pub fn non_empty(&mut self, field: &'static str, value: &str) {
    if value.is_empty() {
      self.push(field, "must not be empty");
    }
  }

  /// For patches of non-nullable, non-empty string columns: `null` and `""`
  /// are both rejected; omission is fine.
  pub fn non_empty_patch(&mut self, field: &'static str, value: &Field<String>) {
    match value {
      Field::Absent => {}
      Field::Null => self.push(field, "must not be null"),
      Field::Value(v) => self.non_empty(field, v),
    }
  }

  /// For patches of non-nullable columns without further constraints.
  pub fn not_null<T>(&mut self, field: &'static str, value: &Field<T>) {
    if value.is_null() {
      self.push(field, "must not be null");
    }
  }

  pub fn in_range(&mut self, field: &'static str, value: i64, min: i64, max: i64) {
    if !(min..=max).contains(&value) {
      self.push(field, format!("must be between {min} and {max}"));
    }
  }

  /// `Ok(())` if nothing was recorded.
  pub fn finish(self) -> Result<(), Self> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for e in &self.0 {
      if !first {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", e.field, e.message)?;
      first = false;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

/// A payload that can check its own field constraints.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidationErrors>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_the_empty_string_is_empty() {
    let mut errs = ValidationErrors::new();
    errs.non_empty("billing_cycle", "");
    errs.non_empty("provider", " ");
    assert!(errs.has("billing_cycle"));
    assert!(!errs.has("provider"));
  }

  #[test]
  fn patch_null_rejected_but_absent_allowed() {
    let mut errs = ValidationErrors::new();
    errs.not_null::<String>("name", &Field::Null);
    errs.not_null("currency", &Field::Value(String::new()));
    errs.non_empty_patch("billing_cycle", &Field::Absent);
    errs.not_null::<bool>("is_active", &Field::Null);
    assert_eq!(errs.errors().len(), 2);
    assert!(errs.has("name"));
    assert!(errs.has("is_active"));
  }

  #[test]
  fn display_joins_every_error() {
    let mut errs = ValidationErrors::new();
    errs.push("a", "bad");
    errs.push("b", "worse");
    assert_eq!(errs.to_string(), "a: bad; b: worse");
    assert!(errs.finish().is_err());
    assert!(ValidationErrors::new().finish().is_ok());
  }

  #[test]
  fn range_is_inclusive() {
    let mut errs = ValidationErrors::new();
    errs.in_range("score", 0, 0, 100);
    errs.in_range("score", 100, 0, 100);
    assert!(errs.is_empty());
    errs.in_range("score", 101, 0, 100);
    assert!(errs.has("score"));
  }
}
