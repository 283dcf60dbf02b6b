//! Error types for `folio-csv`. File-level only; row-level problems
//! are findings, never `Err`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing input file: {0}")]
  MissingFile(PathBuf),

  #[error("{file}: missing required column {column:?}")]
  MissingColumn {
    file:   PathBuf,
    column: &'static str,
  },

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
