//! Structured validation findings.
//!
//! Row-level problems are accumulated across the whole run rather than
//! aborting at the first one, so a single pass reports everything.
//! Reject-severity findings block the loader; warn-severity findings
//! are reported but do not.

use std::fmt;

use crate::{
  dataset::Table,
  record::EntityKind,
};

// ─── Severity ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
  /// Reported but does not block the load.
  Warn,
  /// Blocks the load; the run fails.
  Reject,
}

// ─── Finding kinds ───────────────────────────────────────────────────────────

/// What went wrong, with enough context to locate the source cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FindingKind {
  /// A cell could not be decoded (bad integer, bad list encoding,
  /// missing required value). The row was skipped by the reader.
  Parse {
    field:   &'static str,
    message: String,
  },
  /// A primary-key id collides with an earlier row.
  DuplicateId {
    id:        i64,
    first_row: usize,
  },
  /// A chapter number repeats within one book.
  DuplicateChapterNumber {
    book_id:        i64,
    chapter_number: i64,
    first_row:      usize,
  },
  /// A closed-vocabulary field holds an unrecognised value.
  InvalidEnum {
    field: &'static str,
    value: String,
  },
  /// A direct foreign key does not resolve.
  UnresolvedReference {
    field:  &'static str,
    target: Table,
    id:     i64,
  },
  /// A relationship type tag is outside {character, organization,
  /// location}. Distinct from an id that fails to resolve.
  UnknownEntityKind {
    field: &'static str,
    tag:   String,
  },
  /// A relationship subject/object id does not exist in the table its
  /// type tag selects.
  UnresolvedEntity {
    field: &'static str,
    kind:  EntityKind,
    id:    i64,
  },
  /// A (book, chapter, entity) appearance triple repeats.
  DuplicateAppearance {
    book_id:   i64,
    chapter_id: i64,
    entity_id: i64,
    first_row: usize,
  },
  /// A parent-location name matches no location. Best-effort link;
  /// always warn severity.
  UnknownParentLocation { name: String },
  /// A parent-location name matches more than one location.
  AmbiguousParentLocation {
    name:       String,
    candidates: usize,
  },
}

// ─── Finding ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
  pub severity: Severity,
  pub table:    Table,
  /// 1-based record position in the source file.
  pub row:      usize,
  pub kind:     FindingKind,
}

impl Finding {
  pub fn reject(table: Table, row: usize, kind: FindingKind) -> Self {
    Self { severity: Severity::Reject, table, row, kind }
  }

  pub fn warn(table: Table, row: usize, kind: FindingKind) -> Self {
    Self { severity: Severity::Warn, table, row, kind }
  }

  pub fn is_reject(&self) -> bool { self.severity == Severity::Reject }
}

/// True if any finding blocks the load.
pub fn has_rejects(findings: &[Finding]) -> bool {
  findings.iter().any(Finding::is_reject)
}

impl fmt::Display for Finding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} row {}: ", self.table, self.row)?;
    match &self.kind {
      FindingKind::Parse { field, message } => {
        write!(f, "cannot parse field `{field}`: {message}")
      }
      FindingKind::DuplicateId { id, first_row } => {
        write!(f, "duplicate id {id} (first seen at row {first_row})")
      }
      FindingKind::DuplicateChapterNumber {
        book_id,
        chapter_number,
        first_row,
      } => write!(
        f,
        "chapter number {chapter_number} repeats within book {book_id} \
         (first seen at row {first_row})"
      ),
      FindingKind::InvalidEnum { field, value } => {
        write!(f, "invalid value {value:?} for field `{field}`")
      }
      FindingKind::UnresolvedReference { field, target, id } => {
        write!(f, "field `{field}` references missing {target} id {id}")
      }
      FindingKind::UnknownEntityKind { field, tag } => {
        write!(f, "unknown entity type tag {tag:?} in field `{field}`")
      }
      FindingKind::UnresolvedEntity { field, kind, id } => write!(
        f,
        "field `{field}` references missing {} id {id}",
        kind.table()
      ),
      FindingKind::DuplicateAppearance {
        book_id,
        chapter_id,
        entity_id,
        first_row,
      } => write!(
        f,
        "duplicate appearance triple (book {book_id}, chapter {chapter_id}, \
         entity {entity_id}); first seen at row {first_row}"
      ),
      FindingKind::UnknownParentLocation { name } => {
        write!(f, "parent location {name:?} matches no location")
      }
      FindingKind::AmbiguousParentLocation { name, candidates } => {
        write!(f, "parent location {name:?} matches {candidates} locations")
      }
    }
  }
}
