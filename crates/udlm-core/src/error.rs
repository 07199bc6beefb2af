//! Error types for `udlm-core`.

use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationErrors),

  #[error("invalid owner identity: {0:?}")]
  InvalidOwner(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
