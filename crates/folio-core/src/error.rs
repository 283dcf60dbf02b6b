//! Error types for `folio-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown entity kind tag: {0:?}")]
  UnknownEntityKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
