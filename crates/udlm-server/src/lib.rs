//! HTTP server assembly for UDLM.
//!
//! Wires [`udlm_api::api_router`] under the configured prefix, adds the
//! service-wide root endpoint and the trace, CORS and timeout layers.

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{Json, Router, extract::State, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use udlm_api::{ApiState, TokenKeys, auth::MAX_TOKEN_MINUTES};
use udlm_core::{
  document::Document,
  password::PasswordEntry,
  reminder::Reminder,
  store::{OwnedStore, UserStore},
  subscription::Subscription,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `UDLM_*` environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                        String,
  #[serde(default = "default_port")]
  pub port:                        u16,
  #[serde(default = "default_project_name")]
  pub project_name:                String,
  #[serde(default = "default_api_prefix")]
  pub api_prefix:                  String,
  #[serde(default = "default_store_path")]
  pub store_path:                  PathBuf,
  pub secret_key:                  String,
  #[serde(default = "default_token_minutes")]
  pub access_token_expire_minutes: i64,
  #[serde(default = "default_timeout_secs")]
  pub request_timeout_secs:        u64,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_project_name() -> String { "Universal Digital Life Manager".into() }
fn default_api_prefix() -> String { "/api/v1".into() }
fn default_store_path() -> PathBuf { PathBuf::from("./udlm.db") }
fn default_token_minutes() -> i64 { 60 * 24 }
fn default_timeout_secs() -> u64 { 30 }

/// A configuration value that deserialised but cannot be served with.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("secret_key must not be empty")]
  EmptySecret,
  #[error("access_token_expire_minutes must be between 1 and 525600, got {0}")]
  TokenLifetime(i64),
  #[error("api_prefix must start with '/', got {0:?}")]
  Prefix(String),
}

impl ServerConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.secret_key.trim().is_empty() {
      return Err(ConfigError::EmptySecret);
    }
    if !(1..=MAX_TOKEN_MINUTES).contains(&self.access_token_expire_minutes) {
      return Err(ConfigError::TokenLifetime(self.access_token_expire_minutes));
    }
    if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
      return Err(ConfigError::Prefix(self.api_prefix.clone()));
    }
    Ok(())
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn token_keys(&self) -> TokenKeys {
    TokenKeys::new(self.secret_key.as_bytes(), self.access_token_expire_minutes)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router.
pub fn app<S>(config: Arc<ServerConfig>, store: Arc<S>) -> Router
where
  S: OwnedStore<Subscription>
    + OwnedStore<Reminder>
    + OwnedStore<Document>
    + OwnedStore<PasswordEntry>
    + UserStore
    + 'static,
{
  let api = udlm_api::api_router(ApiState::new(store, config.token_keys()));
  let prefix = config.api_prefix.trim_end_matches('/');

  let router = Router::new()
    .route("/", get(root))
    .with_state(Arc::clone(&config));

  // `nest` rejects an empty or root path.
  let router = if prefix.is_empty() {
    router.merge(api)
  } else {
    router.nest(prefix, api)
  };

  router
    .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

async fn root(State(config): State<Arc<ServerConfig>>) -> Json<Value> {
  Json(json!({
    "message": "UDLM backend is running",
    "project": config.project_name,
  }))
}
