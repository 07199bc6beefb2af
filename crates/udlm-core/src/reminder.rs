//! Reminders — dated to-dos such as rent, bills or warranty expiries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  field::Field,
  record::{OwnerId, RecordId, Resource},
  validate::{Validate, ValidationErrors},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
  pub id:           RecordId,
  pub user_id:      OwnerId,
  pub title:        String,
  pub description:  Option<String>,
  pub due_at:       NaiveDateTime,
  /// `monthly`, `yearly` or `none`.
  pub repeat_cycle: Option<String>,
  /// Free-form grouping: rent, bill, warranty…
  pub category:     Option<String>,
  pub completed:    bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewReminder {
  pub title:        String,
  pub description:  Option<String>,
  /// Naive local time, or RFC 3339 with an offset (converted to UTC).
  #[serde(deserialize_with = "due_at::deserialize")]
  pub due_at:       NaiveDateTime,
  pub repeat_cycle: Option<String>,
  pub category:     Option<String>,
  #[serde(default)]
  pub completed:    bool,
}

impl NewReminder {
  pub fn new(title: impl Into<String>, due_at: NaiveDateTime) -> Self {
    Self {
      title: title.into(),
      description: None,
      due_at,
      repeat_cycle: None,
      category: None,
      completed: false,
    }
  }
}

impl Validate for NewReminder {
  fn validate(&self) -> Result<(), ValidationErrors> {
    Ok(())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReminderPatch {
  pub title:        Field<String>,
  pub description:  Field<String>,
  #[serde(deserialize_with = "due_at::deserialize_field")]
  pub due_at:       Field<NaiveDateTime>,
  pub repeat_cycle: Field<String>,
  pub category:     Field<String>,
  pub completed:    Field<bool>,
}

impl Validate for ReminderPatch {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    errs.not_null("title", &self.title);
    errs.not_null("due_at", &self.due_at);
    errs.not_null("completed", &self.completed);
    errs.finish()
  }
}

mod due_at {
  use chrono::{DateTime, NaiveDateTime};
  use serde::{Deserialize, Deserializer, de::Error as _};

  use crate::field::Field;

  /// Offset timestamps are shifted to UTC and lose the offset; naive ones
  /// are kept as sent.
  pub(super) fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
      Ok(dt) => Ok(dt.naive_utc()),
      Err(_) => raw.parse(),
    }
  }

  pub(super) fn deserialize<'de, D>(d: D) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = String::deserialize(d)?;
    parse(&raw).map_err(D::Error::custom)
  }

  // Only called for keys that are present; absence is `Field::default()`.
  pub(super) fn deserialize_field<'de, D>(d: D) -> Result<Field<NaiveDateTime>, D::Error>
  where
    D: Deserializer<'de>,
  {
    match Option::<String>::deserialize(d)? {
      None => Ok(Field::Null),
      Some(raw) => parse(&raw).map(Field::Value).map_err(D::Error::custom),
    }
  }
}

impl Resource for Reminder {
  type New = NewReminder;
  type Patch = ReminderPatch;

  const NAME: &'static str = "reminder";
  const COLLECTION: &'static str = "reminders";

  fn id(&self) -> RecordId { self.id }

  fn owner(&self) -> OwnerId { self.user_id }
}
