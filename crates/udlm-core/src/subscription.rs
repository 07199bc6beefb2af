//! Subscriptions — recurring payments such as streaming or software plans.
//!
//! Listed by `next_payment_date` ascending; undated subscriptions come first,
//! ties broken by id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  field::Field,
  record::{OwnerId, RecordId, Resource},
  validate::{Validate, ValidationErrors},
};

pub const DEFAULT_CURRENCY: &str = "INR";

/// A stored subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
  pub id:                RecordId,
  pub user_id:           OwnerId,
  pub name:              String,
  pub provider:          Option<String>,
  pub amount:            Option<f64>,
  pub currency:          String,
  /// `monthly` or `yearly`.
  pub billing_cycle:     String,
  pub next_payment_date: Option<NaiveDate>,
  pub auto_detected:     bool,
  pub is_active:         bool,
  pub notes:             Option<String>,
}

fn default_currency() -> String { DEFAULT_CURRENCY.to_owned() }

fn default_true() -> bool { true }

/// Creation payload. Omitted optional fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSubscription {
  pub name:              String,
  pub provider:          Option<String>,
  pub amount:            Option<f64>,
  #[serde(default = "default_currency")]
  pub currency:          String,
  pub billing_cycle:     String,
  pub next_payment_date: Option<NaiveDate>,
  #[serde(default)]
  pub auto_detected:     bool,
  #[serde(default = "default_true")]
  pub is_active:         bool,
  pub notes:             Option<String>,
}

impl NewSubscription {
  /// A subscription with only the required fields set.
  pub fn new(name: impl Into<String>, billing_cycle: impl Into<String>) -> Self {
    Self {
      name:              name.into(),
      provider:          None,
      amount:            None,
      currency:          default_currency(),
      billing_cycle:     billing_cycle.into(),
      next_payment_date: None,
      auto_detected:     false,
      is_active:         true,
      notes:             None,
    }
  }

  pub fn due_on(mut self, date: NaiveDate) -> Self {
    self.next_payment_date = Some(date);
    self
  }
}

impl Validate for NewSubscription {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    errs.non_empty("billing_cycle", &self.billing_cycle);
    errs.finish()
  }
}

/// Sparse update payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubscriptionPatch {
  pub name:              Field<String>,
  pub provider:          Field<String>,
  pub amount:            Field<f64>,
  pub currency:          Field<String>,
  pub billing_cycle:     Field<String>,
  pub next_payment_date: Field<NaiveDate>,
  pub auto_detected:     Field<bool>,
  pub is_active:         Field<bool>,
  pub notes:             Field<String>,
}

impl Validate for SubscriptionPatch {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    errs.not_null("name", &self.name);
    errs.not_null("currency", &self.currency);
    errs.non_empty_patch("billing_cycle", &self.billing_cycle);
    errs.not_null("auto_detected", &self.auto_detected);
    errs.not_null("is_active", &self.is_active);
    errs.finish()
  }
}

impl Resource for Subscription {
  type New = NewSubscription;
  type Patch = SubscriptionPatch;

  const NAME: &'static str = "subscription";
  const COLLECTION: &'static str = "subscriptions";

  fn id(&self) -> RecordId { self.id }

  fn owner(&self) -> OwnerId { self.user_id }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_payload_fills_defaults() {
    let new: NewSubscription = serde_json::from_str(
      r#"{"name":"Netflix","billing_cycle":"monthly","next_payment_date":"2024-06-01"}"#,
    )
    .unwrap();
    assert_eq!(new.currency, "INR");
    assert!(!new.auto_detected);
    assert!(new.is_active);
    assert_eq!(new.next_payment_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    assert!(new.validate().is_ok());
  }

  #[test]
  fn create_payload_requires_name_and_cycle() {
    let err = serde_json::from_str::<NewSubscription>(r#"{"name":"Netflix"}"#).unwrap_err();
    assert!(err.to_string().contains("billing_cycle"), "{err}");

    let blank = NewSubscription::new("Netflix", "");
    let errs = blank.validate().unwrap_err();
    assert!(errs.has("billing_cycle"));
  }

  #[test]
  fn caller_supplied_owner_and_id_are_ignored() {
    let new: NewSubscription = serde_json::from_str(
      r#"{"name":"Spotify","billing_cycle":"yearly","user_id":99,"id":5}"#,
    )
    .unwrap();
    assert_eq!(new, NewSubscription::new("Spotify", "yearly"));
  }

  #[test]
  fn patch_rejects_null_for_required_columns() {
    let patch: SubscriptionPatch =
      serde_json::from_str(r#"{"name":null,"is_active":null,"notes":null}"#).unwrap();
    let errs = patch.validate().unwrap_err();
    assert!(errs.has("name"));
    assert!(errs.has("is_active"));
    assert!(!errs.has("notes"));
  }

  #[test]
  fn empty_strings_are_values_except_billing_cycle() {
    let new: NewSubscription =
      serde_json::from_str(r#"{"name":"","billing_cycle":"monthly","currency":""}"#).unwrap();
    assert!(new.validate().is_ok());

    let patch: SubscriptionPatch =
      serde_json::from_str(r#"{"name":"","currency":"","billing_cycle":""}"#).unwrap();
    let errs = patch.validate().unwrap_err();
    assert_eq!(errs.errors().len(), 1);
    assert!(errs.has("billing_cycle"));
  }

  #[test]
  fn empty_patch_is_valid() {
    let patch: SubscriptionPatch = serde_json::from_str("{}").unwrap();
    assert_eq!(patch, SubscriptionPatch::default());
    assert!(patch.validate().is_ok());
  }
}
