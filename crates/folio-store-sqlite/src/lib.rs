//! SQLite backend for the folio corpus importer.
//!
//! Owns the schema DDL, the all-or-nothing loader, and the read-only
//! query surface downstream consumers (and the round-trip tests)
//! open the finished file with.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{LoadSummary, SqliteStore};
