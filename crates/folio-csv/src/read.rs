//! Header-driven CSV → record decoding.
//!
//! Pipeline per table:
//!   file
//!     └─ csv::Reader (trim-all)   → StringRecord per row
//!          └─ RowView              → named-cell access
//!               └─ FromCsvRow      → typed record or Parse finding

use std::{collections::HashMap, path::Path};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use folio_core::{
  dataset::{Dataset, Row, Table},
  finding::{Finding, FindingKind},
  record::{
    Book, Chapter, Character, CharacterAppearance, EntityRef, GlossaryTerm,
    Location, LocationAppearance, Organization, Relationship,
  },
};

use crate::{
  error::{Error, Result},
  list::decode_list,
};

// ─── Header fixes ────────────────────────────────────────────────────────────

/// Known header typos in the published source files, mapped to the
/// canonical column name.
fn canonical_header(table: Table, header: &str) -> &str {
  match (table, header) {
    (Table::Organizations, "fist_appearance_book_id") => {
      "first_appearance_book_id"
    }
    _ => header,
  }
}

// ─── Cell access ─────────────────────────────────────────────────────────────

/// A decode failure for one cell; becomes a Parse finding.
pub struct CellError {
  pub field:   &'static str,
  pub message: String,
}

/// Named-cell view over one CSV record. Cells are already trimmed by
/// the reader; empty cells read as absent.
pub struct RowView<'a> {
  columns: &'a HashMap<String, usize>,
  record:  &'a StringRecord,
}

impl RowView<'_> {
  /// The cell under `field`, or `None` when the column is absent or
  /// the cell is empty.
  pub fn opt(&self, field: &str) -> Option<&str> {
    self
      .columns
      .get(field)
      .and_then(|&i| self.record.get(i))
      .filter(|s| !s.is_empty())
  }

  pub fn opt_string(&self, field: &str) -> Option<String> {
    self.opt(field).map(str::to_owned)
  }

  pub fn req(&self, field: &'static str) -> Result<&str, CellError> {
    self.opt(field).ok_or_else(|| CellError {
      field,
      message: "required value is missing".to_owned(),
    })
  }

  pub fn req_i64(&self, field: &'static str) -> Result<i64, CellError> {
    parse_i64(field, self.req(field)?)
  }

  pub fn opt_i64(&self, field: &'static str) -> Result<Option<i64>, CellError> {
    self.opt(field).map(|s| parse_i64(field, s)).transpose()
  }

  /// `TRUE` / `FALSE`, case-insensitive, as the source files encode
  /// boolean flags.
  pub fn opt_bool(
    &self,
    field: &'static str,
  ) -> Result<Option<bool>, CellError> {
    self
      .opt(field)
      .map(|s| {
        if s.eq_ignore_ascii_case("true") {
          Ok(true)
        } else if s.eq_ignore_ascii_case("false") {
          Ok(false)
        } else {
          Err(CellError {
            field,
            message: format!("expected TRUE or FALSE, got {s:?}"),
          })
        }
      })
      .transpose()
  }

  /// A serialized list cell; absent decodes to an empty list.
  pub fn list(&self, field: &'static str) -> Result<Vec<String>, CellError> {
    match self.opt(field) {
      None => Ok(Vec::new()),
      Some(raw) => decode_list(raw).map_err(|message| CellError { field, message }),
    }
  }
}

fn parse_i64(field: &'static str, s: &str) -> Result<i64, CellError> {
  s.parse::<i64>().map_err(|_| CellError {
    field,
    message: format!("expected an integer, got {s:?}"),
  })
}

// ─── Record decoding ─────────────────────────────────────────────────────────

/// Decoding seam between the CSV layer and the typed records.
pub trait FromCsvRow: Sized {
  const TABLE: Table;
  /// Columns that must be present in the header row.
  const REQUIRED: &'static [&'static str];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError>;
}

impl FromCsvRow for Book {
  const TABLE: Table = Table::Books;
  const REQUIRED: &'static [&'static str] = &["id", "title"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      id:               row.req_i64("id")?,
      title:            row.req("title")?.to_owned(),
      author:           row.opt_string("author"),
      publisher:        row.opt_string("publisher"),
      publication_date: row.opt_string("publication_date"),
      language:         row.opt_string("language"),
      page_count:       row.opt_i64("page_count")?,
      chapter_count:    row.opt_i64("chapter_count")?,
    })
  }
}

impl FromCsvRow for Chapter {
  const TABLE: Table = Table::Chapters;
  const REQUIRED: &'static [&'static str] =
    &["id", "book_id", "chapter_number"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      id:             row.req_i64("id")?,
      book_id:        row.req_i64("book_id")?,
      chapter_number: row.req_i64("chapter_number")?,
      title:          row.opt_string("title"),
    })
  }
}

impl FromCsvRow for Character {
  const TABLE: Table = Table::Characters;
  const REQUIRED: &'static [&'static str] = &["id", "name"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      id:          row.req_i64("id")?,
      name:        row.req("name")?.to_owned(),
      full_name:   row.opt_string("full_name"),
      aliases:     row.list("aliases")?,
      description: row.opt_string("description"),
      role:        row.opt_string("role"),
      nationality: row.opt_string("nationality"),
      gender:      row.opt_string("gender"),
      first_appearance_book_id: row.opt_i64("first_appearance_book_id")?,
    })
  }
}

impl FromCsvRow for Location {
  const TABLE: Table = Table::Locations;
  const REQUIRED: &'static [&'static str] = &["id", "name"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      id:              row.req_i64("id")?,
      name:            row.req("name")?.to_owned(),
      location_type:   row.opt_string("location_type"),
      parent_location: row.opt_string("parent_location"),
      description:     row.opt_string("description"),
      is_real_place:   row.opt_bool("is_real_place")?,
    })
  }
}

impl FromCsvRow for Organization {
  const TABLE: Table = Table::Organizations;
  const REQUIRED: &'static [&'static str] = &["id", "name"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      id:          row.req_i64("id")?,
      name:        row.req("name")?.to_owned(),
      aliases:     row.list("aliases")?,
      organization_type: row.opt_string("organization_type"),
      description: row.opt_string("description"),
      first_appearance_book_id: row.opt_i64("first_appearance_book_id")?,
    })
  }
}

impl FromCsvRow for GlossaryTerm {
  const TABLE: Table = Table::Glossary;
  const REQUIRED: &'static [&'static str] = &["id", "term"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      id:          row.req_i64("id")?,
      term:        row.req("term")?.to_owned(),
      category:    row.opt_string("category"),
      description: row.opt_string("description"),
    })
  }
}

impl FromCsvRow for CharacterAppearance {
  const TABLE: Table = Table::CharacterAppearances;
  const REQUIRED: &'static [&'static str] =
    &["book_id", "chapter_id", "character_id"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      book_id:      row.req_i64("book_id")?,
      chapter_id:   row.req_i64("chapter_id")?,
      character_id: row.req_i64("character_id")?,
    })
  }
}

impl FromCsvRow for LocationAppearance {
  const TABLE: Table = Table::LocationAppearances;
  const REQUIRED: &'static [&'static str] =
    &["book_id", "chapter_id", "location_id"];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      book_id:     row.req_i64("book_id")?,
      chapter_id:  row.req_i64("chapter_id")?,
      location_id: row.req_i64("location_id")?,
    })
  }
}

impl FromCsvRow for Relationship {
  const TABLE: Table = Table::Relationships;
  const REQUIRED: &'static [&'static str] = &[
    "id",
    "book_id",
    "chapter_id",
    "subject_type",
    "subject_id",
    "predicate",
    "object_type",
    "object_id",
  ];

  fn from_row(row: &RowView<'_>) -> Result<Self, CellError> {
    Ok(Self {
      id:         row.req_i64("id")?,
      book_id:    row.req_i64("book_id")?,
      chapter_id: row.req_i64("chapter_id")?,
      subject:    EntityRef {
        kind: row.req("subject_type")?.to_owned(),
        id:   row.req_i64("subject_id")?,
        name: row.opt_string("subject_name"),
      },
      predicate:  row.req("predicate")?.to_owned(),
      object:     EntityRef {
        kind: row.req("object_type")?.to_owned(),
        id:   row.req_i64("object_id")?,
        name: row.opt_string("object_name"),
      },
    })
  }
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// Read one table file into positioned records. Rows that fail to
/// decode become Parse findings; reading continues.
pub fn read_table<T: FromCsvRow>(
  path: &Path,
) -> Result<(Vec<Row<T>>, Vec<Finding>)> {
  if !path.exists() {
    return Err(Error::MissingFile(path.to_owned()));
  }

  let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

  let headers = reader.headers()?.clone();
  let mut columns: HashMap<String, usize> = HashMap::new();
  for (i, header) in headers.iter().enumerate() {
    columns.insert(canonical_header(T::TABLE, header).to_owned(), i);
  }
  for column in T::REQUIRED {
    if !columns.contains_key(*column) {
      return Err(Error::MissingColumn { file: path.to_owned(), column });
    }
  }

  let mut rows = Vec::new();
  let mut findings = Vec::new();
  for (idx, record) in reader.records().enumerate() {
    let pos = idx + 1;
    let record = match record {
      Ok(record) => record,
      Err(e) => {
        findings.push(Finding::reject(T::TABLE, pos, FindingKind::Parse {
          field:   "record",
          message: e.to_string(),
        }));
        continue;
      }
    };

    let view = RowView { columns: &columns, record: &record };
    match T::from_row(&view) {
      Ok(data) => rows.push(Row::new(pos, data)),
      Err(e) => findings.push(Finding::reject(T::TABLE, pos, FindingKind::Parse {
        field:   e.field,
        message: e.message,
      })),
    }
  }

  debug!(
    table = %T::TABLE,
    rows = rows.len(),
    findings = findings.len(),
    "read table"
  );
  Ok((rows, findings))
}

/// Read all nine table files from `dir`, in load order, accumulating
/// Parse findings across the whole pass.
pub fn read_dataset(dir: &Path) -> Result<(Dataset, Vec<Finding>)> {
  let path = |table: Table| dir.join(table.file_name());
  let mut ds = Dataset::default();
  let mut findings = Vec::new();

  let (rows, f) = read_table::<Book>(&path(Table::Books))?;
  ds.books = rows;
  findings.extend(f);

  let (rows, f) = read_table::<Chapter>(&path(Table::Chapters))?;
  ds.chapters = rows;
  findings.extend(f);

  let (rows, f) = read_table::<Character>(&path(Table::Characters))?;
  ds.characters = rows;
  findings.extend(f);

  let (rows, f) = read_table::<Location>(&path(Table::Locations))?;
  ds.locations = rows;
  findings.extend(f);

  let (rows, f) = read_table::<Organization>(&path(Table::Organizations))?;
  ds.organizations = rows;
  findings.extend(f);

  let (rows, f) = read_table::<GlossaryTerm>(&path(Table::Glossary))?;
  ds.glossary = rows;
  findings.extend(f);

  let (rows, f) =
    read_table::<CharacterAppearance>(&path(Table::CharacterAppearances))?;
  ds.character_appearances = rows;
  findings.extend(f);

  let (rows, f) =
    read_table::<LocationAppearance>(&path(Table::LocationAppearances))?;
  ds.location_appearances = rows;
  findings.extend(f);

  let (rows, f) = read_table::<Relationship>(&path(Table::Relationships))?;
  ds.relationships = rows;
  findings.extend(f);

  debug!(total = ds.total_rows(), "read dataset");
  Ok((ds, findings))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
  }

  #[test]
  fn books_decode_with_empty_cells_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
      &dir,
      "books.csv",
      "id,title,author,publisher,publication_date,language,page_count,chapter_count\n\
       1,Codename Villanelle,Luke Jennings,,2018,en,224,14\n\
       2,No Tomorrow,Luke Jennings,John Murray,,,,\n",
    );

    let (rows, findings) = read_table::<Book>(&path).unwrap();
    assert!(findings.is_empty());
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].pos, 1);
    assert_eq!(rows[0].data.publisher, None);
    assert_eq!(rows[0].data.page_count, Some(224));

    assert_eq!(rows[1].pos, 2);
    assert_eq!(rows[1].data.publication_date, None);
    assert_eq!(rows[1].data.page_count, None);
  }

  #[test]
  fn non_numeric_id_is_a_parse_finding_and_reading_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
      &dir,
      "books.csv",
      "id,title\nx,Bad Row\n2,Good Row\n",
    );

    let (rows, findings) = read_table::<Book>(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].data.id, 2);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].row, 1);
    assert!(matches!(
      &findings[0].kind,
      FindingKind::Parse { field: "id", .. }
    ));
  }

  #[test]
  fn malformed_alias_list_is_a_parse_finding() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
      &dir,
      "characters.csv",
      "id,name,aliases\n\
       1,Villanelle,['Oxana' 'Maria']\n\
       2,Eve,not-a-list\n",
    );

    let (rows, findings) = read_table::<Character>(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].data.aliases, vec!["Oxana", "Maria"]);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].row, 2);
    assert!(matches!(
      &findings[0].kind,
      FindingKind::Parse { field: "aliases", .. }
    ));
  }

  #[test]
  fn misspelled_first_appearance_header_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
      &dir,
      "organizations.csv",
      "id,name,aliases,organization_type,description,fist_appearance_book_id\n\
       30,MI6,['Six'],intelligence agency,,1\n",
    );

    let (rows, findings) = read_table::<Organization>(&path).unwrap();
    assert!(findings.is_empty());
    assert_eq!(rows[0].data.first_appearance_book_id, Some(1));
  }

  #[test]
  fn boolean_flags_decode_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
      &dir,
      "locations.csv",
      "id,name,is_real_place\n\
       1,London,TRUE\n\
       2,The Bunker,False\n\
       3,Nowhere,\n\
       4,Broken,yes\n",
    );

    let (rows, findings) = read_table::<Location>(&path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].data.is_real_place, Some(true));
    assert_eq!(rows[1].data.is_real_place, Some(false));
    assert_eq!(rows[2].data.is_real_place, None);

    assert_eq!(findings.len(), 1);
    assert!(matches!(
      &findings[0].kind,
      FindingKind::Parse { field: "is_real_place", .. }
    ));
  }

  #[test]
  fn read_dataset_loads_all_nine_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(&dir, "books.csv", "id,title\n1,Codename Villanelle\n");
    write_csv(
      &dir,
      "chapters.csv",
      "id,book_id,chapter_number,title\n1,1,1,Palermo\n2,1,2,\n",
    );
    write_csv(
      &dir,
      "characters.csv",
      "id,name,aliases,role,gender\n10,Villanelle,['Oxana'],protagonist,female\n",
    );
    write_csv(
      &dir,
      "locations.csv",
      "id,name,parent_location,is_real_place\n20,London,,TRUE\n",
    );
    write_csv(&dir, "organizations.csv", "id,name,aliases\n30,MI6,['Six']\n");
    write_csv(&dir, "glossary.csv", "id,term,category\n40,tradecraft,espionage\n");
    write_csv(
      &dir,
      "characters_appearances.csv",
      "book_id,chapter_id,character_id\n1,1,10\n",
    );
    write_csv(
      &dir,
      "locations_appearances.csv",
      "book_id,chapter_id,location_id\n1,1,20\n",
    );
    write_csv(
      &dir,
      "relationships.csv",
      "id,book_id,chapter_id,subject_type,subject_id,subject_name,predicate,object_type,object_id,object_name\n\
       100,1,1,character,10,Villanelle,evades,organization,30,MI6\n",
    );

    let (ds, findings) = read_dataset(dir.path()).unwrap();
    assert!(findings.is_empty());
    assert_eq!(ds.total_rows(), 10);
    for table in Table::ALL {
      assert!(ds.len(table) > 0, "no rows read for {table}");
    }

    // The parsed dataset is internally consistent end to end.
    let report = folio_core::validate::validate(
      &ds,
      &folio_core::validate::Options::default(),
    );
    assert_eq!(report, vec![]);
  }

  #[test]
  fn missing_file_is_a_file_level_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_table::<Book>(&dir.path().join("books.csv")).unwrap_err();
    assert!(matches!(err, Error::MissingFile(_)));
  }

  #[test]
  fn missing_required_column_is_a_file_level_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "books.csv", "id,name\n1,Wrong Header\n");

    let err = read_table::<Book>(&path).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { column: "title", .. }));
  }

  #[test]
  fn relationship_rows_carry_both_entity_refs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
      &dir,
      "relationships.csv",
      "id,book_id,chapter_id,subject_type,subject_id,subject_name,predicate,object_type,object_id,object_name\n\
       100,1,1,character,11,Eve,works for,organization,30,MI6\n",
    );

    let (rows, findings) = read_table::<Relationship>(&path).unwrap();
    assert!(findings.is_empty());
    let rel = &rows[0].data;
    assert_eq!(rel.subject.kind, "character");
    assert_eq!(rel.subject.id, 11);
    assert_eq!(rel.object.name.as_deref(), Some("MI6"));
    assert_eq!(rel.predicate, "works for");
  }
}
