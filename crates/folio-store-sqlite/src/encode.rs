//! Encoding and decoding helpers between domain records and the
//! plain-text representations stored in SQLite columns.
//!
//! Alias lists are stored as compact JSON arrays; entity type tags as
//! their lowercase tag strings; booleans as 0/1 (rusqlite handles the
//! integer conversion).

use folio_core::record::{Character, EntityKind, EntityRef, Organization, Relationship};

use crate::Result;

// ─── Alias lists ─────────────────────────────────────────────────────────────

pub fn encode_aliases(aliases: &[String]) -> Result<String> {
  Ok(serde_json::to_string(aliases)?)
}

pub fn decode_aliases(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Entity kind tags ────────────────────────────────────────────────────────

pub fn decode_entity_kind(tag: &str) -> Result<EntityKind> {
  Ok(EntityKind::from_tag(tag)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `characters` row.
pub struct RawCharacter {
  pub id:          i64,
  pub name:        String,
  pub full_name:   Option<String>,
  pub aliases:     String,
  pub description: Option<String>,
  pub role:        Option<String>,
  pub nationality: Option<String>,
  pub gender:      Option<String>,
  pub first_appearance_book_id: Option<i64>,
}

impl RawCharacter {
  pub fn into_character(self) -> Result<Character> {
    Ok(Character {
      id:          self.id,
      name:        self.name,
      full_name:   self.full_name,
      aliases:     decode_aliases(&self.aliases)?,
      description: self.description,
      role:        self.role,
      nationality: self.nationality,
      gender:      self.gender,
      first_appearance_book_id: self.first_appearance_book_id,
    })
  }
}

/// Raw values read directly from an `organizations` row.
pub struct RawOrganization {
  pub id:          i64,
  pub name:        String,
  pub aliases:     String,
  pub organization_type: Option<String>,
  pub description: Option<String>,
  pub first_appearance_book_id: Option<i64>,
}

impl RawOrganization {
  pub fn into_organization(self) -> Result<Organization> {
    Ok(Organization {
      id:          self.id,
      name:        self.name,
      aliases:     decode_aliases(&self.aliases)?,
      organization_type: self.organization_type,
      description: self.description,
      first_appearance_book_id: self.first_appearance_book_id,
    })
  }
}

/// Raw values read directly from a `relationships` row.
pub struct RawRelationship {
  pub id:           i64,
  pub book_id:      i64,
  pub chapter_id:   i64,
  pub subject_type: String,
  pub subject_id:   i64,
  pub subject_name: Option<String>,
  pub predicate:    String,
  pub object_type:  String,
  pub object_id:    i64,
  pub object_name:  Option<String>,
}

impl RawRelationship {
  pub fn into_relationship(self) -> Result<Relationship> {
    // The CHECK constraints guarantee the tags decode; going through
    // the codec anyway keeps a corrupted file from round-tripping
    // silently.
    decode_entity_kind(&self.subject_type)?;
    decode_entity_kind(&self.object_type)?;
    Ok(Relationship {
      id:         self.id,
      book_id:    self.book_id,
      chapter_id: self.chapter_id,
      subject:    EntityRef {
        kind: self.subject_type,
        id:   self.subject_id,
        name: self.subject_name,
      },
      predicate:  self.predicate,
      object:     EntityRef {
        kind: self.object_type,
        id:   self.object_id,
        name: self.object_name,
      },
    })
  }
}
