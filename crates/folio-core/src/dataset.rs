//! The table catalogue and the in-memory dataset aggregate.

use serde::{Deserialize, Serialize};

use crate::record::{
  Book, Chapter, Character, CharacterAppearance, GlossaryTerm, Location,
  LocationAppearance, Organization, Relationship,
};

// ─── Table catalogue ─────────────────────────────────────────────────────────

/// The nine source tables, in load order: parent entities before the
/// junction tables that reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
  Books,
  Chapters,
  Characters,
  Locations,
  Organizations,
  Glossary,
  CharacterAppearances,
  LocationAppearances,
  Relationships,
}

impl Table {
  /// All tables in dependency (load) order.
  pub const ALL: [Table; 9] = [
    Table::Books,
    Table::Chapters,
    Table::Characters,
    Table::Locations,
    Table::Organizations,
    Table::Glossary,
    Table::CharacterAppearances,
    Table::LocationAppearances,
    Table::Relationships,
  ];

  /// The database table name.
  pub fn name(self) -> &'static str {
    match self {
      Self::Books => "books",
      Self::Chapters => "chapters",
      Self::Characters => "characters",
      Self::Locations => "locations",
      Self::Organizations => "organizations",
      Self::Glossary => "glossary",
      Self::CharacterAppearances => "characters_appearances",
      Self::LocationAppearances => "locations_appearances",
      Self::Relationships => "relationships",
    }
  }

  /// The source CSV file name under the data directory.
  pub fn file_name(self) -> &'static str {
    match self {
      Self::Books => "books.csv",
      Self::Chapters => "chapters.csv",
      Self::Characters => "characters.csv",
      Self::Locations => "locations.csv",
      Self::Organizations => "organizations.csv",
      Self::Glossary => "glossary.csv",
      Self::CharacterAppearances => "characters_appearances.csv",
      Self::LocationAppearances => "locations_appearances.csv",
      Self::Relationships => "relationships.csv",
    }
  }
}

impl std::fmt::Display for Table {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

// ─── Positioned rows ─────────────────────────────────────────────────────────

/// A record paired with its 1-based position in the source file, kept
/// so findings can point at the offending line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
  pub pos:  usize,
  pub data: T,
}

impl<T> Row<T> {
  pub fn new(pos: usize, data: T) -> Self { Self { pos, data } }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// The complete parsed input: every table, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
  pub books:         Vec<Row<Book>>,
  pub chapters:      Vec<Row<Chapter>>,
  pub characters:    Vec<Row<Character>>,
  pub locations:     Vec<Row<Location>>,
  pub organizations: Vec<Row<Organization>>,
  pub glossary:      Vec<Row<GlossaryTerm>>,
  pub character_appearances: Vec<Row<CharacterAppearance>>,
  pub location_appearances:  Vec<Row<LocationAppearance>>,
  pub relationships: Vec<Row<Relationship>>,
}

impl Dataset {
  pub fn len(&self, table: Table) -> usize {
    match table {
      Table::Books => self.books.len(),
      Table::Chapters => self.chapters.len(),
      Table::Characters => self.characters.len(),
      Table::Locations => self.locations.len(),
      Table::Organizations => self.organizations.len(),
      Table::Glossary => self.glossary.len(),
      Table::CharacterAppearances => self.character_appearances.len(),
      Table::LocationAppearances => self.location_appearances.len(),
      Table::Relationships => self.relationships.len(),
    }
  }

  pub fn total_rows(&self) -> usize {
    Table::ALL.iter().map(|t| self.len(*t)).sum()
  }

  /// Row counts per table, in load order.
  pub fn counts(&self) -> Vec<(Table, usize)> {
    Table::ALL.iter().map(|t| (*t, self.len(*t))).collect()
  }
}
