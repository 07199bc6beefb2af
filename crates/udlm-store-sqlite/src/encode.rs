//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD`, naive timestamps as
//! `YYYY-MM-DDTHH:MM:SS.fffffffff` (fixed width, so text order is time order)
//! and instants as RFC 3339 strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::{Row, types::{Type, Value}};
use udlm_core::Field;

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> chrono::ParseResult<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
}

// ─── NaiveDateTime ───────────────────────────────────────────────────────────

pub fn encode_naive_dt(dt: NaiveDateTime) -> String {
  dt.format(NAIVE_DT_FORMAT).to_string()
}

pub fn decode_naive_dt(s: &str) -> chrono::ParseResult<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, NAIVE_DT_FORMAT)
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> chrono::ParseResult<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

// ─── Row accessors ───────────────────────────────────────────────────────────

fn conversion_error(row: &Row<'_>, col: &str, e: chrono::ParseError) -> rusqlite::Error {
  let idx = row.as_ref().column_index(col).unwrap_or_default();
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

pub fn date_column(row: &Row<'_>, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
  let raw: Option<String> = row.get(col)?;
  raw
    .map(|s| decode_date(&s).map_err(|e| conversion_error(row, col, e)))
    .transpose()
}

pub fn naive_dt_column(row: &Row<'_>, col: &str) -> rusqlite::Result<NaiveDateTime> {
  let raw: String = row.get(col)?;
  decode_naive_dt(&raw).map_err(|e| conversion_error(row, col, e))
}

pub fn dt_column(row: &Row<'_>, col: &str) -> rusqlite::Result<DateTime<Utc>> {
  let raw: String = row.get(col)?;
  decode_dt(&raw).map_err(|e| conversion_error(row, col, e))
}

// ─── Patches ─────────────────────────────────────────────────────────────────

/// Column assignments collected from a sparse patch.
#[derive(Default)]
pub struct Assignments(Vec<(&'static str, Value)>);

impl Assignments {
  /// Record `column = value` unless the field was absent. An explicit null
  /// becomes SQL `NULL`.
  pub fn set<T>(&mut self, column: &'static str, field: Field<T>)
  where
    T: Into<Value>,
  {
    if let Some(value) = field.into_update() {
      self.0.push((column, value.into()));
    }
  }

  pub fn into_inner(self) -> Vec<(&'static str, Value)> { self.0 }
}
