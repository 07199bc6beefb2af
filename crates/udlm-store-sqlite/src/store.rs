//! [`SqliteStore`] — the SQLite implementation of the UDLM store traits.

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use udlm_core::{
  OwnerId, RecordId, Validate,
  store::{OwnedStore, UserStore},
  user::User,
};

use crate::{
  Result,
  encode::{dt_column, encode_dt},
  schema::SCHEMA,
  table::Table,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A UDLM store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `id, user_id, <columns>` for `R`'s table.
fn select_list<R: Table>() -> String {
  let mut cols = vec!["id", "user_id"];
  cols.extend_from_slice(R::COLUMNS);
  cols.join(", ")
}

// ─── OwnedStore impl ─────────────────────────────────────────────────────────

impl<R: Table> OwnedStore<R> for SqliteStore {
  type Error = crate::Error;

  async fn list(&self, owner: OwnerId) -> Result<Vec<R>> {
    let sql = format!(
      "SELECT {} FROM {} WHERE user_id = ?1 ORDER BY {}",
      select_list::<R>(),
      R::TABLE,
      R::ORDER_BY,
    );
    let owner = owner.get();

    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![owner], |row| R::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(records)
  }

  async fn create(&self, owner: OwnerId, input: R::New) -> Result<R> {
    Validate::validate(&input)?;

    let placeholders = (0..R::COLUMNS.len())
      .map(|i| format!("?{}", i + 2))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "INSERT INTO {} (user_id, {}) VALUES (?1, {placeholders}) RETURNING {}",
      R::TABLE,
      R::COLUMNS.join(", "),
      select_list::<R>(),
    );

    let mut params = vec![Value::Integer(owner.get())];
    params.extend(R::insert_values(input));

    let record = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params_from_iter(params), |row| {
          R::from_row(row)
        })?)
      })
      .await?;

    Ok(record)
  }

  async fn update(
    &self,
    owner: OwnerId,
    id: RecordId,
    patch: R::Patch,
  ) -> Result<Option<R>> {
    Validate::validate(&patch)?;

    let assignments = R::patch_values(patch).into_inner();
    let sql = if assignments.is_empty() {
      format!(
        "SELECT {} FROM {} WHERE id = ?1 AND user_id = ?2",
        select_list::<R>(),
        R::TABLE,
      )
    } else {
      let set_clause = assignments
        .iter()
        .enumerate()
        .map(|(i, (col, _))| format!("{col} = ?{}", i + 3))
        .collect::<Vec<_>>()
        .join(", ");
      format!(
        "UPDATE {} SET {set_clause} WHERE id = ?1 AND user_id = ?2 RETURNING {}",
        R::TABLE,
        select_list::<R>(),
      )
    };

    let mut params = vec![Value::Integer(id), Value::Integer(owner.get())];
    params.extend(assignments.into_iter().map(|(_, v)| v));

    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(params), |row| {
              R::from_row(row)
            })
            .optional()?,
        )
      })
      .await?;

    Ok(record)
  }

  async fn delete(&self, owner: OwnerId, id: RecordId) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1 AND user_id = ?2", R::TABLE);
    let owner = owner.get();

    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id, owner])?))
      .await?;

    Ok(removed > 0)
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            OwnerId::new(row.get("id")?),
    email:         row.get("email")?,
    password_hash: row.get("password_hash")?,
    created_at:    dt_column(row, "created_at")?,
  })
}

impl UserStore for SqliteStore {
  type Error = crate::Error;

  async fn add_user(&self, email: String, password_hash: String) -> Result<Option<User>> {
    let at_str = encode_dt(Utc::now());

    let user = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "INSERT INTO users (email, password_hash, created_at)
               VALUES (?1, ?2, ?3)
               ON CONFLICT (email) DO NOTHING
               RETURNING id, email, password_hash, created_at",
              rusqlite::params![email, password_hash, at_str],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(user)
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let user = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
              rusqlite::params![email],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(user)
  }
}
