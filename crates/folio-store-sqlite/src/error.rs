//! Error type for `folio-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] folio_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// The target file exists and no overwrite was requested. A
  /// destructive default would make a typo in the output path silently
  /// eat a previous build.
  #[error("refusing to overwrite existing database: {0}")]
  AlreadyExists(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
