//! Core types and trait definitions for the UDLM personal-data store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every owned resource (subscriptions, reminders, documents, password
//! entries) is described here once; storage backends and the HTTP layer are
//! generic over [`record::Resource`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod document;
pub mod error;
pub mod field;
pub mod password;
pub mod record;
pub mod reminder;
pub mod store;
pub mod subscription;
pub mod user;
pub mod validate;

pub use error::{Error, Result};
pub use field::Field;
pub use record::{OwnerId, RecordId, Resource};
pub use validate::{FieldError, Validate, ValidationErrors};
