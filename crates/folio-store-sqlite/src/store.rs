//! [`SqliteStore`] — the transactional loader and the read-only query
//! surface over the finished file.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Transaction};
use tracing::{debug, info};

use folio_core::{
  dataset::{Dataset, Table},
  record::{
    Book, Chapter, Character, CharacterAppearance, EntityKind, GlossaryTerm,
    Location, LocationAppearance, Organization, Relationship,
  },
};

use crate::{
  Error, Result,
  encode::{RawCharacter, RawOrganization, RawRelationship, encode_aliases},
  schema::SCHEMA,
};

// ─── Load summary ────────────────────────────────────────────────────────────

/// Per-table row counts for the report after a successful load.
#[derive(Debug, Clone)]
pub struct LoadSummary {
  pub counts: Vec<(Table, usize)>,
  pub total:  usize,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A corpus database backed by a single SQLite file.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Build a fresh database at `path` from a validated dataset.
  ///
  /// The file is written as a sibling temp file and renamed over the
  /// target only after the transaction commits and the connection
  /// closes, so a failed or killed run never leaves a half-written
  /// target. An existing target is refused unless `overwrite` is set;
  /// with `overwrite`, the prior file stays untouched until the rename.
  pub fn build(
    path: &Path,
    overwrite: bool,
    ds: &Dataset,
  ) -> Result<LoadSummary> {
    if path.exists() && !overwrite {
      return Err(Error::AlreadyExists(path.to_owned()));
    }
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    if tmp.exists() {
      // Leftover from an earlier failed run.
      std::fs::remove_file(&tmp)?;
    }

    match Self::build_at(&tmp, ds) {
      Ok(summary) => {
        std::fs::rename(&tmp, path)?;
        info!(path = %path.display(), rows = summary.total, "database built");
        Ok(summary)
      }
      Err(e) => {
        let _ = std::fs::remove_file(&tmp);
        Err(e)
      }
    }
  }

  fn build_at(path: &Path, ds: &Dataset) -> Result<LoadSummary> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;

    let tx = conn.transaction()?;
    insert_all(&tx, ds)?;
    tx.commit()?;

    conn.close().map_err(|(_, e)| Error::Database(e))?;

    let counts = ds.counts();
    Ok(LoadSummary { total: counts.iter().map(|(_, n)| n).sum(), counts })
  }

  /// Open a finished database read-only, the way downstream consumers
  /// (graph exporters, integrity checkers) do.
  pub fn open_read_only(path: &Path) -> Result<Self> {
    let conn = Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(Self { conn })
  }

  // ── Counts ────────────────────────────────────────────────────────────────

  pub fn count(&self, table: Table) -> Result<i64> {
    let n = self.conn.query_row(
      &format!("SELECT COUNT(*) FROM {}", table.name()),
      [],
      |row| row.get(0),
    )?;
    Ok(n)
  }

  pub fn counts(&self) -> Result<Vec<(Table, i64)>> {
    Table::ALL
      .iter()
      .map(|t| Ok((*t, self.count(*t)?)))
      .collect()
  }

  // ── Entity tables ─────────────────────────────────────────────────────────

  pub fn books(&self) -> Result<Vec<Book>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, title, author, publisher, publication_date, language,
              page_count, chapter_count
       FROM books ORDER BY id",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok(Book {
          id:               row.get(0)?,
          title:            row.get(1)?,
          author:           row.get(2)?,
          publisher:        row.get(3)?,
          publication_date: row.get(4)?,
          language:         row.get(5)?,
          page_count:       row.get(6)?,
          chapter_count:    row.get(7)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  pub fn chapters(&self) -> Result<Vec<Chapter>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, book_id, chapter_number, title FROM chapters ORDER BY id",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok(Chapter {
          id:             row.get(0)?,
          book_id:        row.get(1)?,
          chapter_number: row.get(2)?,
          title:          row.get(3)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  pub fn characters(&self) -> Result<Vec<Character>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, name, full_name, aliases, description, role, nationality,
              gender, first_appearance_book_id
       FROM characters ORDER BY id",
    )?;
    let raws = stmt
      .query_map([], |row| {
        Ok(RawCharacter {
          id:          row.get(0)?,
          name:        row.get(1)?,
          full_name:   row.get(2)?,
          aliases:     row.get(3)?,
          description: row.get(4)?,
          role:        row.get(5)?,
          nationality: row.get(6)?,
          gender:      row.get(7)?,
          first_appearance_book_id: row.get(8)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawCharacter::into_character).collect()
  }

  pub fn locations(&self) -> Result<Vec<Location>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, name, location_type, parent_location, description,
              is_real_place
       FROM locations ORDER BY id",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok(Location {
          id:              row.get(0)?,
          name:            row.get(1)?,
          location_type:   row.get(2)?,
          parent_location: row.get(3)?,
          description:     row.get(4)?,
          is_real_place:   row.get(5)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  pub fn organizations(&self) -> Result<Vec<Organization>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, name, aliases, organization_type, description,
              first_appearance_book_id
       FROM organizations ORDER BY id",
    )?;
    let raws = stmt
      .query_map([], |row| {
        Ok(RawOrganization {
          id:          row.get(0)?,
          name:        row.get(1)?,
          aliases:     row.get(2)?,
          organization_type: row.get(3)?,
          description: row.get(4)?,
          first_appearance_book_id: row.get(5)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws
      .into_iter()
      .map(RawOrganization::into_organization)
      .collect()
  }

  pub fn glossary(&self) -> Result<Vec<GlossaryTerm>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, term, category, description FROM glossary ORDER BY id",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok(GlossaryTerm {
          id:          row.get(0)?,
          term:        row.get(1)?,
          category:    row.get(2)?,
          description: row.get(3)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  // ── Junction tables ───────────────────────────────────────────────────────

  pub fn character_appearances(&self) -> Result<Vec<CharacterAppearance>> {
    let mut stmt = self.conn.prepare(
      "SELECT book_id, chapter_id, character_id FROM characters_appearances",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok(CharacterAppearance {
          book_id:      row.get(0)?,
          chapter_id:   row.get(1)?,
          character_id: row.get(2)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  pub fn location_appearances(&self) -> Result<Vec<LocationAppearance>> {
    let mut stmt = self.conn.prepare(
      "SELECT book_id, chapter_id, location_id FROM locations_appearances",
    )?;
    let rows = stmt
      .query_map([], |row| {
        Ok(LocationAppearance {
          book_id:     row.get(0)?,
          chapter_id:  row.get(1)?,
          location_id: row.get(2)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  pub fn relationships(&self) -> Result<Vec<Relationship>> {
    let mut stmt = self.conn.prepare(
      "SELECT id, book_id, chapter_id,
              subject_type, subject_id, subject_name,
              predicate,
              object_type, object_id, object_name
       FROM relationships ORDER BY id",
    )?;
    let raws = stmt
      .query_map([], |row| {
        Ok(RawRelationship {
          id:           row.get(0)?,
          book_id:      row.get(1)?,
          chapter_id:   row.get(2)?,
          subject_type: row.get(3)?,
          subject_id:   row.get(4)?,
          subject_name: row.get(5)?,
          predicate:    row.get(6)?,
          object_type:  row.get(7)?,
          object_id:    row.get(8)?,
          object_name:  row.get(9)?,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws
      .into_iter()
      .map(RawRelationship::into_relationship)
      .collect()
  }

  // ── Post-hoc audit ────────────────────────────────────────────────────────

  /// Re-verify the persisted file against the same invariants the
  /// validator enforces pre-load. Returns one description per
  /// violation; empty means clean.
  pub fn audit(&self) -> Result<Vec<String>> {
    let mut violations = Vec::new();

    // SQLite's own view of the enforced foreign keys.
    {
      let mut stmt =
        self.conn.prepare("SELECT \"table\", parent FROM pragma_foreign_key_check")?;
      let rows = stmt
        .query_map([], |row| {
          Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      for (table, parent) in rows {
        violations.push(format!("foreign key violation: {table} -> {parent}"));
      }
    }

    // Polymorphic references, resolved through the type tag.
    for rel in self.relationships()? {
      for (side, entity) in
        [("subject", &rel.subject), ("object", &rel.object)]
      {
        // The type tag picks the table the id must resolve in.
        let kind = EntityKind::from_tag(&entity.kind)?;
        let exists: i64 = self.conn.query_row(
          &format!("SELECT COUNT(*) FROM {} WHERE id = ?1", kind.table().name()),
          [entity.id],
          |row| row.get(0),
        )?;
        if exists == 0 {
          violations.push(format!(
            "relationship {}: {side} {}:{} not found in {}",
            rel.id,
            entity.kind,
            entity.id,
            kind.table().name(),
          ));
        }
      }
    }

    // Key name columns must never be empty.
    for (table, column) in [
      ("books", "title"),
      ("characters", "name"),
      ("locations", "name"),
      ("organizations", "name"),
      ("glossary", "term"),
    ] {
      let count: i64 = self.conn.query_row(
        &format!(
          "SELECT COUNT(*) FROM {table}
           WHERE {column} IS NULL OR TRIM({column}) = ''"
        ),
        [],
        |row| row.get(0),
      )?;
      if count > 0 {
        violations.push(format!("{table}.{column}: {count} empty values"));
      }
    }

    // Alias columns must hold well-formed JSON arrays.
    for table in ["characters", "organizations"] {
      let mut stmt = self
        .conn
        .prepare(&format!("SELECT id, aliases FROM {table}"))?;
      let rows = stmt
        .query_map([], |row| {
          Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      for (id, aliases) in rows {
        if serde_json::from_str::<Vec<String>>(&aliases).is_err() {
          violations
            .push(format!("{table} id {id}: aliases is not a JSON array"));
        }
      }
    }

    Ok(violations)
  }
}

// ─── Insertion ───────────────────────────────────────────────────────────────

/// Insert every table in dependency order inside the open transaction.
fn insert_all(tx: &Transaction<'_>, ds: &Dataset) -> Result<()> {
  {
    let mut stmt = tx.prepare(
      "INSERT INTO books (id, title, author, publisher, publication_date,
                          language, page_count, chapter_count)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for row in &ds.books {
      let b = &row.data;
      stmt.execute(rusqlite::params![
        b.id,
        b.title,
        b.author,
        b.publisher,
        b.publication_date,
        b.language,
        b.page_count,
        b.chapter_count,
      ])?;
    }
  }
  debug!(rows = ds.books.len(), "inserted books");

  {
    let mut stmt = tx.prepare(
      "INSERT INTO chapters (id, book_id, chapter_number, title)
       VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in &ds.chapters {
      let c = &row.data;
      stmt.execute(rusqlite::params![
        c.id,
        c.book_id,
        c.chapter_number,
        c.title
      ])?;
    }
  }
  debug!(rows = ds.chapters.len(), "inserted chapters");

  {
    let mut stmt = tx.prepare(
      "INSERT INTO characters (id, name, full_name, aliases, description,
                               role, nationality, gender,
                               first_appearance_book_id)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for row in &ds.characters {
      let c = &row.data;
      stmt.execute(rusqlite::params![
        c.id,
        c.name,
        c.full_name,
        encode_aliases(&c.aliases)?,
        c.description,
        c.role,
        c.nationality,
        c.gender,
        c.first_appearance_book_id,
      ])?;
    }
  }
  debug!(rows = ds.characters.len(), "inserted characters");

  {
    let mut stmt = tx.prepare(
      "INSERT INTO locations (id, name, location_type, parent_location,
                              description, is_real_place)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for row in &ds.locations {
      let l = &row.data;
      stmt.execute(rusqlite::params![
        l.id,
        l.name,
        l.location_type,
        l.parent_location,
        l.description,
        l.is_real_place,
      ])?;
    }
  }
  debug!(rows = ds.locations.len(), "inserted locations");

  {
    let mut stmt = tx.prepare(
      "INSERT INTO organizations (id, name, aliases, organization_type,
                                  description, first_appearance_book_id)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for row in &ds.organizations {
      let o = &row.data;
      stmt.execute(rusqlite::params![
        o.id,
        o.name,
        encode_aliases(&o.aliases)?,
        o.organization_type,
        o.description,
        o.first_appearance_book_id,
      ])?;
    }
  }
  debug!(rows = ds.organizations.len(), "inserted organizations");

  {
    let mut stmt = tx.prepare(
      "INSERT INTO glossary (id, term, category, description)
       VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in &ds.glossary {
      let g = &row.data;
      stmt.execute(rusqlite::params![
        g.id,
        g.term,
        g.category,
        g.description
      ])?;
    }
  }
  debug!(rows = ds.glossary.len(), "inserted glossary");

  {
    let mut stmt = tx.prepare(
      "INSERT INTO characters_appearances (book_id, chapter_id, character_id)
       VALUES (?1, ?2, ?3)",
    )?;
    for row in &ds.character_appearances {
      let a = &row.data;
      stmt.execute(rusqlite::params![a.book_id, a.chapter_id, a.character_id])?;
    }
  }
  debug!(
    rows = ds.character_appearances.len(),
    "inserted character appearances"
  );

  {
    let mut stmt = tx.prepare(
      "INSERT INTO locations_appearances (book_id, chapter_id, location_id)
       VALUES (?1, ?2, ?3)",
    )?;
    for row in &ds.location_appearances {
      let a = &row.data;
      stmt.execute(rusqlite::params![a.book_id, a.chapter_id, a.location_id])?;
    }
  }
  debug!(
    rows = ds.location_appearances.len(),
    "inserted location appearances"
  );

  {
    let mut stmt = tx.prepare(
      "INSERT INTO relationships (id, book_id, chapter_id,
                                  subject_type, subject_id, subject_name,
                                  predicate,
                                  object_type, object_id, object_name)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;
    for row in &ds.relationships {
      let r = &row.data;
      stmt.execute(rusqlite::params![
        r.id,
        r.book_id,
        r.chapter_id,
        r.subject.kind,
        r.subject.id,
        r.subject.name,
        r.predicate,
        r.object.kind,
        r.object.id,
        r.object.name,
      ])?;
    }
  }
  debug!(rows = ds.relationships.len(), "inserted relationships");

  Ok(())
}

/// Sibling temp path so the final rename stays on one filesystem.
fn tmp_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().unwrap_or_default().to_owned();
  name.push(".tmp");
  path.with_file_name(name)
}
