//! JSON REST API for UDLM.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`OwnedStore`] for every resource type plus [`UserStore`]. TLS, CORS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", udlm_api::api_router(state))
//! ```

pub mod accounts;
pub mod auth;
pub mod error;
pub mod payload;
pub mod resources;

use std::sync::Arc;

use axum::{Router, routing::post};
use udlm_core::{
  document::Document,
  password::PasswordEntry,
  reminder::Reminder,
  store::{OwnedStore, UserStore},
  subscription::Subscription,
};

pub use auth::{Owner, TokenKeys};
pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub tokens: Arc<TokenKeys>,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, tokens: TokenKeys) -> Self {
    Self { store, tokens: Arc::new(tokens) }
  }
}

// Manual impl: cloning the `Arc`s does not require `S: Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      tokens: Arc::clone(&self.tokens),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: OwnedStore<Subscription>
    + OwnedStore<Reminder>
    + OwnedStore<Document>
    + OwnedStore<PasswordEntry>
    + UserStore
    + 'static,
{
  let router = Router::new()
    .route("/auth/register", post(accounts::register::<S>))
    .route("/auth/login", post(accounts::login::<S>));

  let router = resources::mount::<S, Subscription>(router);
  let router = resources::mount::<S, Reminder>(router);
  let router = resources::mount::<S, Document>(router);
  let router = resources::mount::<S, PasswordEntry>(router);

  router.with_state(state)
}

// ─── Router tests ────────────────────────────────────────────────────────────
