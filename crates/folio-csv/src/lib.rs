//! CSV Record Reader for the folio corpus importer.
//!
//! Parses each source table into typed row records, in file order and
//! 1-indexed for error reporting. Cells are trimmed and empty strings
//! normalised to `None`. A row that fails to decode becomes a
//! reject-severity Parse finding and reading continues; only
//! file-level problems (missing file, missing column, I/O) are `Err`.

pub mod error;
pub mod list;
pub mod read;

pub use error::{Error, Result};
pub use read::{read_dataset, read_table};
