//! SQLite backend for the UDLM store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod table;

pub use error::{Error, Result};
pub use encode::Assignments;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
