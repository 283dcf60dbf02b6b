//! Core types and validation logic for the folio corpus importer.
//!
//! This crate is deliberately free of file-system and database
//! dependencies. The whole validation pass is a pure function over an
//! in-memory [`dataset::Dataset`]; I/O lives in `folio-csv` and
//! `folio-store-sqlite`.

pub mod dataset;
pub mod error;
pub mod finding;
pub mod record;
pub mod validate;

pub use error::{Error, Result};
