//! Error type for `udlm-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] udlm_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl From<udlm_core::ValidationErrors> for Error {
  fn from(errs: udlm_core::ValidationErrors) -> Self { Self::Core(errs.into()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
