//! Password entries — per-service credentials.
//!
//! `encrypted_password` is ciphertext produced by the caller; this crate and
//! the stores never see or produce plaintext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  field::Field,
  record::{OwnerId, RecordId, Resource},
  validate::{Validate, ValidationErrors},
};

pub const MIN_STRENGTH: i64 = 0;
pub const MAX_STRENGTH: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
  pub id:                 RecordId,
  pub user_id:            OwnerId,
  /// e.g. "Gmail".
  pub service:            String,
  pub username:           String,
  pub encrypted_password: String,
  /// 0–100.
  pub strength_score:     Option<i64>,
  pub breached:           bool,
  pub created_at:         DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPasswordEntry {
  pub service:            String,
  pub username:           String,
  pub encrypted_password: String,
  pub strength_score:     Option<i64>,
  #[serde(default)]
  pub breached:           bool,
}

impl NewPasswordEntry {
  pub fn new(
    service: impl Into<String>,
    username: impl Into<String>,
    encrypted_password: impl Into<String>,
  ) -> Self {
    Self {
      service:            service.into(),
      username:           username.into(),
      encrypted_password: encrypted_password.into(),
      strength_score:     None,
      breached:           false,
    }
  }
}

impl Validate for NewPasswordEntry {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    if let Some(score) = self.strength_score {
      errs.in_range("strength_score", score, MIN_STRENGTH, MAX_STRENGTH);
    }
    errs.finish()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordEntryPatch {
  pub service:            Field<String>,
  pub username:           Field<String>,
  pub encrypted_password: Field<String>,
  pub strength_score:     Field<i64>,
  pub breached:           Field<bool>,
}

impl Validate for PasswordEntryPatch {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    errs.not_null("service", &self.service);
    errs.not_null("username", &self.username);
    errs.not_null("encrypted_password", &self.encrypted_password);
    if let Some(&score) = self.strength_score.value() {
      errs.in_range("strength_score", score, MIN_STRENGTH, MAX_STRENGTH);
    }
    errs.not_null("breached", &self.breached);
    errs.finish()
  }
}

impl Resource for PasswordEntry {
  type New = NewPasswordEntry;
  type Patch = PasswordEntryPatch;

  const NAME: &'static str = "password entry";
  const COLLECTION: &'static str = "passwords";

  fn id(&self) -> RecordId { self.id }

  fn owner(&self) -> OwnerId { self.user_id }
}
