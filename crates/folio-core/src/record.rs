//! Row record types — one struct per source table.
//!
//! Records are immutable once parsed; the pipeline is load-once,
//! read-many. Optional fields are `None` where the source cell was
//! empty. Closed-vocabulary fields (`role`, `gender`) stay as raw
//! strings here so the validator can report bad values as findings
//! instead of the reader dropping them at parse time.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, dataset::Table};

// ─── Entity tables ───────────────────────────────────────────────────────────

/// Root entity; referenced by chapters, characters, and organizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
  pub id:               i64,
  pub title:            String,
  pub author:           Option<String>,
  pub publisher:        Option<String>,
  /// Opaque source text; never computed on.
  pub publication_date: Option<String>,
  pub language:         Option<String>,
  pub page_count:       Option<i64>,
  pub chapter_count:    Option<i64>,
}

/// Child of [`Book`]. `chapter_number` is unique within a book, not
/// globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
  pub id:             i64,
  pub book_id:        i64,
  pub chapter_number: i64,
  pub title:          Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
  pub id:          i64,
  pub name:        String,
  pub full_name:   Option<String>,
  pub aliases:     Vec<String>,
  pub description: Option<String>,
  /// Closed vocabulary, checked by the validator
  /// (see [`crate::validate::CHARACTER_ROLES`]).
  pub role:        Option<String>,
  pub nationality: Option<String>,
  /// Closed vocabulary, checked by the validator
  /// (see [`crate::validate::GENDERS`]).
  pub gender:      Option<String>,
  pub first_appearance_book_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub id:            i64,
  pub name:          String,
  pub location_type: Option<String>,
  /// Name-keyed self link, not an id foreign key. The source data does
  /// not guarantee the name resolves, so dangling or ambiguous parents
  /// are warn-severity findings rather than hard failures.
  pub parent_location: Option<String>,
  pub description:   Option<String>,
  pub is_real_place: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
  pub id:          i64,
  pub name:        String,
  pub aliases:     Vec<String>,
  pub organization_type: Option<String>,
  pub description: Option<String>,
  pub first_appearance_book_id: Option<i64>,
}

/// Independent of all other entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryTerm {
  pub id:          i64,
  pub term:        String,
  pub category:    Option<String>,
  pub description: Option<String>,
}

// ─── Junction / fact tables ──────────────────────────────────────────────────

/// "This character appears in this chapter of this book."
/// The triple is the composite key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterAppearance {
  pub book_id:      i64,
  pub chapter_id:   i64,
  pub character_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationAppearance {
  pub book_id:     i64,
  pub chapter_id:  i64,
  pub location_id: i64,
}

/// A predicate-labelled edge between two entities, anchored to the
/// book and chapter where it is established.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
  pub id:         i64,
  pub book_id:    i64,
  pub chapter_id: i64,
  pub subject:    EntityRef,
  /// Free-text edge label, e.g. "works for".
  pub predicate:  String,
  pub object:     EntityRef,
}

// ─── Polymorphic references ──────────────────────────────────────────────────

/// The closed set of tables a relationship subject/object can point at.
/// Resolution always goes through explicit branching on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
  Character,
  Organization,
  Location,
}

impl EntityKind {
  /// The tag string stored in `subject_type` / `object_type` columns.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_tag(self) -> &'static str {
    match self {
      Self::Character => "character",
      Self::Organization => "organization",
      Self::Location => "location",
    }
  }

  pub fn from_tag(tag: &str) -> Result<Self> {
    match tag {
      "character" => Ok(Self::Character),
      "organization" => Ok(Self::Organization),
      "location" => Ok(Self::Location),
      other => Err(Error::UnknownEntityKind(other.to_owned())),
    }
  }

  /// The table the tag selects for id resolution.
  pub fn table(self) -> Table {
    match self {
      Self::Character => Table::Characters,
      Self::Organization => Table::Organizations,
      Self::Location => Table::Locations,
    }
  }
}

/// One side of a relationship: a type tag, the id it selects, and the
/// denormalised display name carried by the source data.
///
/// `kind` keeps the raw tag from the file; the validator reports an
/// unrecognised tag as its own finding kind, distinct from an id that
/// fails to resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
  pub kind: String,
  pub id:   i64,
  pub name: Option<String>,
}
