//! [`Table`] — how each resource type maps onto its SQLite table.
//!
//! [`SqliteStore`](crate::SqliteStore) implements
//! [`OwnedStore`](udlm_core::store::OwnedStore) once, generically, for every
//! type that implements this trait.

use chrono::Utc;
use rusqlite::{Row, types::Value};
use udlm_core::{
  OwnerId, Resource,
  document::{Document, NewDocument},
  password::{NewPasswordEntry, PasswordEntry},
  reminder::{NewReminder, Reminder},
  subscription::{NewSubscription, Subscription},
};

use crate::encode::{
  Assignments, date_column, dt_column, encode_date, encode_dt, encode_naive_dt,
  naive_dt_column,
};

/// Table mapping for an owned resource.
///
/// Every table has `id INTEGER PRIMARY KEY` and `user_id INTEGER NOT NULL`;
/// [`Table::COLUMNS`] lists the remaining columns.
pub trait Table: Resource {
  const TABLE: &'static str;

  /// Columns written on insert, in the order [`Table::insert_values`] yields
  /// them.
  const COLUMNS: &'static [&'static str];

  /// `ORDER BY` clause for listing. Must end in a unique key so the order is
  /// total.
  const ORDER_BY: &'static str;

  fn insert_values(input: Self::New) -> Vec<Value>;

  /// Assignments for the fields present in `patch` only.
  fn patch_values(patch: Self::Patch) -> Assignments;

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

fn owner_column(row: &Row<'_>) -> rusqlite::Result<OwnerId> {
  Ok(OwnerId::new(row.get("user_id")?))
}

// ─── Subscription ────────────────────────────────────────────────────────────

impl Table for Subscription {
  const TABLE: &'static str = "subscriptions";
  const COLUMNS: &'static [&'static str] = &[
    "name",
    "provider",
    "amount",
    "currency",
    "billing_cycle",
    "next_payment_date",
    "auto_detected",
    "is_active",
    "notes",
  ];
  // NULL dates sort first under SQLite's default ordering.
  const ORDER_BY: &'static str = "next_payment_date ASC, id ASC";

  fn insert_values(input: NewSubscription) -> Vec<Value> {
    vec![
      input.name.into(),
      input.provider.into(),
      input.amount.into(),
      input.currency.into(),
      input.billing_cycle.into(),
      input.next_payment_date.map(encode_date).into(),
      input.auto_detected.into(),
      input.is_active.into(),
      input.notes.into(),
    ]
  }

  fn patch_values(patch: Self::Patch) -> Assignments {
    let mut a = Assignments::default();
    a.set("name", patch.name);
    a.set("provider", patch.provider);
    a.set("amount", patch.amount);
    a.set("currency", patch.currency);
    a.set("billing_cycle", patch.billing_cycle);
    a.set("next_payment_date", patch.next_payment_date.map(encode_date));
    a.set("auto_detected", patch.auto_detected);
    a.set("is_active", patch.is_active);
    a.set("notes", patch.notes);
    a
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Subscription {
      id:                row.get("id")?,
      user_id:           owner_column(row)?,
      name:              row.get("name")?,
      provider:          row.get("provider")?,
      amount:            row.get("amount")?,
      currency:          row.get("currency")?,
      billing_cycle:     row.get("billing_cycle")?,
      next_payment_date: date_column(row, "next_payment_date")?,
      auto_detected:     row.get("auto_detected")?,
      is_active:         row.get("is_active")?,
      notes:             row.get("notes")?,
    })
  }
}

// ─── Reminder ────────────────────────────────────────────────────────────────

impl Table for Reminder {
  const TABLE: &'static str = "reminders";
  const COLUMNS: &'static [&'static str] = &[
    "title",
    "description",
    "due_at",
    "repeat_cycle",
    "category",
    "completed",
  ];
  const ORDER_BY: &'static str = "due_at ASC, id ASC";

  fn insert_values(input: NewReminder) -> Vec<Value> {
    vec![
      input.title.into(),
      input.description.into(),
      encode_naive_dt(input.due_at).into(),
      input.repeat_cycle.into(),
      input.category.into(),
      input.completed.into(),
    ]
  }

  fn patch_values(patch: Self::Patch) -> Assignments {
    let mut a = Assignments::default();
    a.set("title", patch.title);
    a.set("description", patch.description);
    a.set("due_at", patch.due_at.map(encode_naive_dt));
    a.set("repeat_cycle", patch.repeat_cycle);
    a.set("category", patch.category);
    a.set("completed", patch.completed);
    a
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Reminder {
      id:           row.get("id")?,
      user_id:      owner_column(row)?,
      title:        row.get("title")?,
      description:  row.get("description")?,
      due_at:       naive_dt_column(row, "due_at")?,
      repeat_cycle: row.get("repeat_cycle")?,
      category:     row.get("category")?,
      completed:    row.get("completed")?,
    })
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

impl Table for Document {
  const TABLE: &'static str = "documents";
  const COLUMNS: &'static [&'static str] = &[
    "filename",
    "doc_type",
    "expiry_date",
    "storage_path",
    "created_at",
  ];
  const ORDER_BY: &'static str = "expiry_date ASC, id ASC";

  fn insert_values(input: NewDocument) -> Vec<Value> {
    vec![
      input.filename.into(),
      input.doc_type.into(),
      input.expiry_date.map(encode_date).into(),
      input.storage_path.into(),
      encode_dt(Utc::now()).into(),
    ]
  }

  fn patch_values(patch: Self::Patch) -> Assignments {
    let mut a = Assignments::default();
    a.set("filename", patch.filename);
    a.set("doc_type", patch.doc_type);
    a.set("expiry_date", patch.expiry_date.map(encode_date));
    a.set("storage_path", patch.storage_path);
    a
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Document {
      id:           row.get("id")?,
      user_id:      owner_column(row)?,
      filename:     row.get("filename")?,
      doc_type:     row.get("doc_type")?,
      expiry_date:  date_column(row, "expiry_date")?,
      storage_path: row.get("storage_path")?,
      created_at:   dt_column(row, "created_at")?,
    })
  }
}

// ─── PasswordEntry ───────────────────────────────────────────────────────────

impl Table for PasswordEntry {
  const TABLE: &'static str = "password_entries";
  const COLUMNS: &'static [&'static str] = &[
    "service",
    "username",
    "encrypted_password",
    "strength_score",
    "breached",
    "created_at",
  ];
  const ORDER_BY: &'static str = "service ASC, id ASC";

  fn insert_values(input: NewPasswordEntry) -> Vec<Value> {
    vec![
      input.service.into(),
      input.username.into(),
      input.encrypted_password.into(),
      input.strength_score.into(),
      input.breached.into(),
      encode_dt(Utc::now()).into(),
    ]
  }

  fn patch_values(patch: Self::Patch) -> Assignments {
    let mut a = Assignments::default();
    a.set("service", patch.service);
    a.set("username", patch.username);
    a.set("encrypted_password", patch.encrypted_password);
    a.set("strength_score", patch.strength_score);
    a.set("breached", patch.breached);
    a
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(PasswordEntry {
      id:                 row.get("id")?,
      user_id:            owner_column(row)?,
      service:            row.get("service")?,
      username:           row.get("username")?,
      encrypted_password: row.get("encrypted_password")?,
      strength_score:     row.get("strength_score")?,
      breached:           row.get("breached")?,
      created_at:         dt_column(row, "created_at")?,
    })
  }
}
