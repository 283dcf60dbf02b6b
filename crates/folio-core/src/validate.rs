//! The Integrity Validator — a pure pass over the parsed dataset.
//!
//! All checks run before anything is persisted, in a fixed phase
//! order: primary-key uniqueness, closed vocabularies, direct foreign
//! keys, polymorphic references, appearance-triple uniqueness,
//! per-book chapter numbering, and the best-effort parent-location
//! lookup. Findings come out in phase order and file order within a
//! phase, so two runs over the same input produce identical output.

use std::collections::HashMap;

use crate::{
  dataset::{Dataset, Row, Table},
  finding::{Finding, FindingKind, Severity, has_rejects},
  record::{EntityKind, EntityRef},
};

// ─── Vocabularies ────────────────────────────────────────────────────────────

/// Accepted values for `characters.role`.
pub const CHARACTER_ROLES: [&str; 5] =
  ["protagonist", "supporting", "antagonist", "minor", "mentioned"];

/// Accepted values for `characters.gender`.
pub const GENDERS: [&str; 4] = ["female", "male", "other", "unknown"];

// ─── Options ─────────────────────────────────────────────────────────────────

/// What to do with duplicate (book, chapter, entity) appearance
/// triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
  /// Duplicates fail the run.
  #[default]
  Reject,
  /// Duplicates are reported as warnings; the caller is expected to
  /// drop them with [`dedupe_appearances`] before loading.
  DedupeAndWarn,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
  pub duplicate_appearances:  DuplicatePolicy,
  /// Compare `role`/`gender` values ignoring ASCII case.
  pub case_insensitive_enums: bool,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Validate the complete dataset. Returns every finding; the caller
/// decides whether to proceed based on
/// [`has_rejects`](crate::finding::has_rejects).
pub fn validate(ds: &Dataset, options: &Options) -> Vec<Finding> {
  let mut findings = Vec::new();

  // Phase 1: primary-key uniqueness. The indexes double as the id
  // sets for the reference phases below.
  let books = id_index(Table::Books, &ds.books, |b| b.id, &mut findings);
  let chapters =
    id_index(Table::Chapters, &ds.chapters, |c| c.id, &mut findings);
  let characters =
    id_index(Table::Characters, &ds.characters, |c| c.id, &mut findings);
  let locations =
    id_index(Table::Locations, &ds.locations, |l| l.id, &mut findings);
  let organizations = id_index(
    Table::Organizations,
    &ds.organizations,
    |o| o.id,
    &mut findings,
  );
  id_index(Table::Glossary, &ds.glossary, |g| g.id, &mut findings);
  id_index(
    Table::Relationships,
    &ds.relationships,
    |r| r.id,
    &mut findings,
  );

  // Phase 2: closed vocabularies.
  for row in &ds.characters {
    check_vocab(
      Table::Characters,
      row.pos,
      "role",
      row.data.role.as_deref(),
      &CHARACTER_ROLES,
      options,
      &mut findings,
    );
    check_vocab(
      Table::Characters,
      row.pos,
      "gender",
      row.data.gender.as_deref(),
      &GENDERS,
      options,
      &mut findings,
    );
  }

  // Phase 3: direct foreign keys.
  for row in &ds.chapters {
    check_ref(
      &books,
      Table::Chapters,
      row.pos,
      "book_id",
      Table::Books,
      row.data.book_id,
      &mut findings,
    );
  }
  for row in &ds.characters {
    if let Some(id) = row.data.first_appearance_book_id {
      check_ref(
        &books,
        Table::Characters,
        row.pos,
        "first_appearance_book_id",
        Table::Books,
        id,
        &mut findings,
      );
    }
  }
  for row in &ds.organizations {
    if let Some(id) = row.data.first_appearance_book_id {
      check_ref(
        &books,
        Table::Organizations,
        row.pos,
        "first_appearance_book_id",
        Table::Books,
        id,
        &mut findings,
      );
    }
  }
  for row in &ds.character_appearances {
    let a = &row.data;
    check_ref(
      &books,
      Table::CharacterAppearances,
      row.pos,
      "book_id",
      Table::Books,
      a.book_id,
      &mut findings,
    );
    check_ref(
      &chapters,
      Table::CharacterAppearances,
      row.pos,
      "chapter_id",
      Table::Chapters,
      a.chapter_id,
      &mut findings,
    );
    check_ref(
      &characters,
      Table::CharacterAppearances,
      row.pos,
      "character_id",
      Table::Characters,
      a.character_id,
      &mut findings,
    );
  }
  for row in &ds.location_appearances {
    let a = &row.data;
    check_ref(
      &books,
      Table::LocationAppearances,
      row.pos,
      "book_id",
      Table::Books,
      a.book_id,
      &mut findings,
    );
    check_ref(
      &chapters,
      Table::LocationAppearances,
      row.pos,
      "chapter_id",
      Table::Chapters,
      a.chapter_id,
      &mut findings,
    );
    check_ref(
      &locations,
      Table::LocationAppearances,
      row.pos,
      "location_id",
      Table::Locations,
      a.location_id,
      &mut findings,
    );
  }
  for row in &ds.relationships {
    check_ref(
      &books,
      Table::Relationships,
      row.pos,
      "book_id",
      Table::Books,
      row.data.book_id,
      &mut findings,
    );
    check_ref(
      &chapters,
      Table::Relationships,
      row.pos,
      "chapter_id",
      Table::Chapters,
      row.data.chapter_id,
      &mut findings,
    );
  }

  // Phase 4: polymorphic references. The type tag selects the id set.
  for row in &ds.relationships {
    check_entity_ref(
      row.pos,
      "subject_type",
      "subject_id",
      &row.data.subject,
      (&characters, &organizations, &locations),
      &mut findings,
    );
    check_entity_ref(
      row.pos,
      "object_type",
      "object_id",
      &row.data.object,
      (&characters, &organizations, &locations),
      &mut findings,
    );
  }

  // Phase 5: appearance-triple uniqueness. Severity follows the
  // configured duplicate policy.
  let dup_severity = match options.duplicate_appearances {
    DuplicatePolicy::Reject => Severity::Reject,
    DuplicatePolicy::DedupeAndWarn => Severity::Warn,
  };
  check_triples(
    Table::CharacterAppearances,
    &ds.character_appearances,
    |a| (a.book_id, a.chapter_id, a.character_id),
    dup_severity,
    &mut findings,
  );
  check_triples(
    Table::LocationAppearances,
    &ds.location_appearances,
    |a| (a.book_id, a.chapter_id, a.location_id),
    dup_severity,
    &mut findings,
  );

  // Phase 6: chapter numbers are unique within their book.
  let mut numbering: HashMap<(i64, i64), usize> = HashMap::new();
  for row in &ds.chapters {
    let key = (row.data.book_id, row.data.chapter_number);
    match numbering.get(&key) {
      Some(&first_row) => findings.push(Finding::reject(
        Table::Chapters,
        row.pos,
        FindingKind::DuplicateChapterNumber {
          book_id:        row.data.book_id,
          chapter_number: row.data.chapter_number,
          first_row,
        },
      )),
      None => {
        numbering.insert(key, row.pos);
      }
    }
  }

  // Phase 7: parent-location names, best-effort. Never a reject.
  let mut names: HashMap<&str, usize> = HashMap::new();
  for row in &ds.locations {
    *names.entry(row.data.name.as_str()).or_insert(0) += 1;
  }
  for row in &ds.locations {
    let Some(parent) = row.data.parent_location.as_deref() else {
      continue;
    };
    match names.get(parent).copied().unwrap_or(0) {
      0 => findings.push(Finding::warn(
        Table::Locations,
        row.pos,
        FindingKind::UnknownParentLocation { name: parent.to_owned() },
      )),
      1 => {}
      candidates => findings.push(Finding::warn(
        Table::Locations,
        row.pos,
        FindingKind::AmbiguousParentLocation {
          name: parent.to_owned(),
          candidates,
        },
      )),
    }
  }

  findings
}

/// Drop every appearance row whose triple repeats an earlier one,
/// keeping the first occurrence. Returns the number of rows removed.
/// Used when the duplicate policy is [`DuplicatePolicy::DedupeAndWarn`].
pub fn dedupe_appearances(ds: &mut Dataset) -> usize {
  fn dedupe<T, K: std::hash::Hash + Eq>(
    rows: &mut Vec<Row<T>>,
    key: impl Fn(&T) -> K,
  ) -> usize {
    let before = rows.len();
    let mut seen = std::collections::HashSet::new();
    rows.retain(|row| seen.insert(key(&row.data)));
    before - rows.len()
  }

  dedupe(&mut ds.character_appearances, |a| {
    (a.book_id, a.chapter_id, a.character_id)
  }) + dedupe(&mut ds.location_appearances, |a| {
    (a.book_id, a.chapter_id, a.location_id)
  })
}

/// Lowercase every `role`/`gender` value in place. Used with
/// [`Options::case_insensitive_enums`] so values accepted under that
/// policy still satisfy the lowercase CHECK constraints in the schema.
pub fn canonicalize_enum_case(ds: &mut Dataset) {
  for row in &mut ds.characters {
    if let Some(role) = &mut row.data.role {
      role.make_ascii_lowercase();
    }
    if let Some(gender) = &mut row.data.gender {
      gender.make_ascii_lowercase();
    }
  }
}

// ─── Phase helpers ───────────────────────────────────────────────────────────

/// Build an id → first-row index, emitting a reject for every collision.
fn id_index<T>(
  table: Table,
  rows: &[Row<T>],
  id: impl Fn(&T) -> i64,
  findings: &mut Vec<Finding>,
) -> HashMap<i64, usize> {
  let mut index = HashMap::with_capacity(rows.len());
  for row in rows {
    let id = id(&row.data);
    match index.get(&id) {
      Some(&first_row) => findings.push(Finding::reject(
        table,
        row.pos,
        FindingKind::DuplicateId { id, first_row },
      )),
      None => {
        index.insert(id, row.pos);
      }
    }
  }
  index
}

fn check_vocab(
  table: Table,
  row: usize,
  field: &'static str,
  value: Option<&str>,
  vocabulary: &[&str],
  options: &Options,
  findings: &mut Vec<Finding>,
) {
  let Some(value) = value else { return };
  let accepted = if options.case_insensitive_enums {
    vocabulary.iter().any(|v| v.eq_ignore_ascii_case(value))
  } else {
    vocabulary.contains(&value)
  };
  if !accepted {
    findings.push(Finding::reject(table, row, FindingKind::InvalidEnum {
      field,
      value: value.to_owned(),
    }));
  }
}

fn check_ref(
  ids: &HashMap<i64, usize>,
  table: Table,
  row: usize,
  field: &'static str,
  target: Table,
  id: i64,
  findings: &mut Vec<Finding>,
) {
  if !ids.contains_key(&id) {
    findings.push(Finding::reject(
      table,
      row,
      FindingKind::UnresolvedReference { field, target, id },
    ));
  }
}

/// Resolve one side of a relationship through its type tag.
fn check_entity_ref(
  row: usize,
  tag_field: &'static str,
  id_field: &'static str,
  entity: &EntityRef,
  (characters, organizations, locations): (
    &HashMap<i64, usize>,
    &HashMap<i64, usize>,
    &HashMap<i64, usize>,
  ),
  findings: &mut Vec<Finding>,
) {
  let kind = match EntityKind::from_tag(&entity.kind) {
    Ok(kind) => kind,
    Err(_) => {
      findings.push(Finding::reject(
        Table::Relationships,
        row,
        FindingKind::UnknownEntityKind {
          field: tag_field,
          tag:   entity.kind.clone(),
        },
      ));
      return;
    }
  };

  let known = match kind {
    EntityKind::Character => characters.contains_key(&entity.id),
    EntityKind::Organization => organizations.contains_key(&entity.id),
    EntityKind::Location => locations.contains_key(&entity.id),
  };
  if !known {
    findings.push(Finding::reject(
      Table::Relationships,
      row,
      FindingKind::UnresolvedEntity { field: id_field, kind, id: entity.id },
    ));
  }
}

fn check_triples<T>(
  table: Table,
  rows: &[Row<T>],
  key: impl Fn(&T) -> (i64, i64, i64),
  severity: Severity,
  findings: &mut Vec<Finding>,
) {
  let mut seen: HashMap<(i64, i64, i64), usize> = HashMap::new();
  for row in rows {
    let triple = key(&row.data);
    match seen.get(&triple) {
      Some(&first_row) => findings.push(Finding {
        severity,
        table,
        row: row.pos,
        kind: FindingKind::DuplicateAppearance {
          book_id:    triple.0,
          chapter_id: triple.1,
          entity_id:  triple.2,
          first_row,
        },
      }),
      None => {
        seen.insert(triple, row.pos);
      }
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{
    Book, Chapter, Character, CharacterAppearance, GlossaryTerm, Location,
    LocationAppearance, Organization, Relationship,
  };

  fn book(id: i64, title: &str) -> Book {
    Book {
      id,
      title: title.into(),
      author: None,
      publisher: None,
      publication_date: None,
      language: None,
      page_count: None,
      chapter_count: None,
    }
  }

  fn chapter(id: i64, book_id: i64, number: i64) -> Chapter {
    Chapter { id, book_id, chapter_number: number, title: None }
  }

  fn character(id: i64, name: &str, role: &str) -> Character {
    Character {
      id,
      name: name.into(),
      full_name: None,
      aliases: vec![],
      description: None,
      role: Some(role.into()),
      nationality: None,
      gender: Some("female".into()),
      first_appearance_book_id: Some(1),
    }
  }

  fn location(id: i64, name: &str, parent: Option<&str>) -> Location {
    Location {
      id,
      name: name.into(),
      location_type: None,
      parent_location: parent.map(Into::into),
      description: None,
      is_real_place: None,
    }
  }

  fn entity(kind: &str, id: i64, name: &str) -> EntityRef {
    EntityRef { kind: kind.into(), id, name: Some(name.into()) }
  }

  /// A small internally-consistent dataset used as the baseline.
  fn fixture() -> Dataset {
    let mut ds = Dataset::default();
    ds.books = vec![Row::new(1, book(1, "Codename Villanelle"))];
    ds.chapters = vec![
      Row::new(1, chapter(1, 1, 1)),
      Row::new(2, chapter(2, 1, 2)),
    ];
    ds.characters = vec![
      Row::new(1, character(10, "Villanelle", "protagonist")),
      Row::new(2, character(11, "Eve", "supporting")),
    ];
    ds.locations = vec![
      Row::new(1, location(20, "London", None)),
      Row::new(2, location(21, "Thames House", Some("London"))),
    ];
    ds.organizations = vec![Row::new(1, Organization {
      id: 30,
      name: "MI6".into(),
      aliases: vec!["Six".into()],
      organization_type: Some("intelligence agency".into()),
      description: None,
      first_appearance_book_id: Some(1),
    })];
    ds.glossary = vec![Row::new(1, GlossaryTerm {
      id: 40,
      term: "tradecraft".into(),
      category: Some("espionage".into()),
      description: None,
    })];
    ds.character_appearances = vec![
      Row::new(1, CharacterAppearance {
        book_id:      1,
        chapter_id:   1,
        character_id: 10,
      }),
      Row::new(2, CharacterAppearance {
        book_id:      1,
        chapter_id:   2,
        character_id: 11,
      }),
    ];
    ds.location_appearances = vec![Row::new(1, LocationAppearance {
      book_id:     1,
      chapter_id:  1,
      location_id: 20,
    })];
    ds.relationships = vec![Row::new(1, Relationship {
      id:         100,
      book_id:    1,
      chapter_id: 1,
      subject:    entity("character", 11, "Eve"),
      predicate:  "works for".into(),
      object:     entity("organization", 30, "MI6"),
    })];
    ds
  }

  #[test]
  fn clean_dataset_produces_no_findings() {
    let findings = validate(&fixture(), &Options::default());
    assert_eq!(findings, vec![]);
  }

  #[test]
  fn findings_are_deterministic() {
    let ds = fixture();
    let a = validate(&ds, &Options::default());
    let b = validate(&ds, &Options::default());
    assert_eq!(a, b);
  }

  // ── Primary keys ──────────────────────────────────────────────────────────

  #[test]
  fn duplicate_book_id_is_rejected() {
    let mut ds = fixture();
    ds.books.push(Row::new(2, book(1, "No Tomorrow")));

    let findings = validate(&ds, &Options::default());
    assert!(has_rejects(&findings));
    assert!(findings.iter().any(|f| f.table == Table::Books
      && f.row == 2
      && matches!(f.kind, FindingKind::DuplicateId { id: 1, first_row: 1 })));
  }

  #[test]
  fn duplicate_relationship_id_is_rejected() {
    let mut ds = fixture();
    let mut extra = ds.relationships[0].data.clone();
    extra.predicate = "hunts".into();
    ds.relationships.push(Row::new(2, extra));

    let findings = validate(&ds, &Options::default());
    assert!(findings.iter().any(|f| f.table == Table::Relationships
      && matches!(f.kind, FindingKind::DuplicateId { id: 100, .. })));
  }

  // ── Vocabularies ──────────────────────────────────────────────────────────

  #[test]
  fn out_of_vocabulary_role_is_rejected() {
    let mut ds = fixture();
    ds.characters.push(Row::new(3, character(12, "Konstantin", "hero")));

    let findings = validate(&ds, &Options::default());
    let f = findings
      .iter()
      .find(|f| matches!(f.kind, FindingKind::InvalidEnum { .. }))
      .expect("expected an InvalidEnum finding");
    assert_eq!(f.table, Table::Characters);
    assert_eq!(f.row, 3);
    assert!(matches!(
      &f.kind,
      FindingKind::InvalidEnum { field: "role", value } if value == "hero"
    ));
  }

  #[test]
  fn bad_gender_value_is_rejected() {
    let mut ds = fixture();
    ds.characters[0].data.gender = Some("f".into());

    let findings = validate(&ds, &Options::default());
    assert!(findings.iter().any(
      |f| matches!(&f.kind, FindingKind::InvalidEnum { field: "gender", .. })
    ));
  }

  #[test]
  fn enum_case_policy_is_configurable() {
    let mut ds = fixture();
    ds.characters[0].data.role = Some("Protagonist".into());

    // Case-sensitive (default): reject.
    assert!(has_rejects(&validate(&ds, &Options::default())));

    // Case-insensitive: accepted.
    let lenient =
      Options { case_insensitive_enums: true, ..Options::default() };
    assert_eq!(validate(&ds, &lenient), vec![]);

    // Canonicalisation brings the value back to the stored form.
    canonicalize_enum_case(&mut ds);
    assert_eq!(ds.characters[0].data.role.as_deref(), Some("protagonist"));
  }

  // ── Direct foreign keys ───────────────────────────────────────────────────

  #[test]
  fn appearance_with_missing_character_is_rejected() {
    let mut ds = fixture();
    ds.character_appearances.push(Row::new(3, CharacterAppearance {
      book_id:      1,
      chapter_id:   1,
      character_id: 999,
    }));

    let findings = validate(&ds, &Options::default());
    let f = findings
      .iter()
      .find(|f| matches!(f.kind, FindingKind::UnresolvedReference { .. }))
      .expect("expected an UnresolvedReference finding");
    assert_eq!(f.table, Table::CharacterAppearances);
    assert_eq!(f.row, 3);
    assert!(matches!(f.kind, FindingKind::UnresolvedReference {
      field:  "character_id",
      target: Table::Characters,
      id:     999,
    }));
  }

  #[test]
  fn first_appearance_book_must_exist_when_present() {
    let mut ds = fixture();
    ds.organizations[0].data.first_appearance_book_id = Some(7);

    let findings = validate(&ds, &Options::default());
    assert!(findings.iter().any(|f| f.table == Table::Organizations
      && matches!(f.kind, FindingKind::UnresolvedReference {
        field: "first_appearance_book_id",
        target: Table::Books,
        id: 7,
      })));
  }

  #[test]
  fn chapter_with_missing_book_is_rejected() {
    let mut ds = fixture();
    ds.chapters.push(Row::new(3, chapter(3, 99, 1)));

    let findings = validate(&ds, &Options::default());
    assert!(findings.iter().any(|f| f.table == Table::Chapters
      && f.row == 3
      && matches!(f.kind, FindingKind::UnresolvedReference {
        field: "book_id",
        target: Table::Books,
        id: 99,
      })));
  }

  // ── Polymorphic references ────────────────────────────────────────────────

  #[test]
  fn unknown_type_tag_is_its_own_finding() {
    let mut ds = fixture();
    ds.relationships[0].data.subject.kind = "book".into();

    let findings = validate(&ds, &Options::default());
    assert!(findings.iter().any(|f| matches!(
      &f.kind,
      FindingKind::UnknownEntityKind { field: "subject_type", tag } if tag == "book"
    )));
    // No UnresolvedEntity for that side; the tag never resolved.
    assert!(
      !findings
        .iter()
        .any(|f| matches!(f.kind, FindingKind::UnresolvedEntity { .. }))
    );
  }

  #[test]
  fn object_id_resolves_in_the_table_its_tag_selects() {
    let mut ds = fixture();
    // Id 20 exists as a location but the tag says organization.
    ds.relationships[0].data.object = entity("organization", 20, "London");

    let findings = validate(&ds, &Options::default());
    assert!(findings.iter().any(|f| matches!(
      f.kind,
      FindingKind::UnresolvedEntity {
        field: "object_id",
        kind:  EntityKind::Organization,
        id:    20,
      }
    )));
  }

  // ── Appearance triples ────────────────────────────────────────────────────

  #[test]
  fn duplicate_triple_rejects_by_default() {
    let mut ds = fixture();
    let dup = ds.character_appearances[0].data;
    ds.character_appearances.push(Row::new(3, dup));

    let findings = validate(&ds, &Options::default());
    assert!(has_rejects(&findings));
    assert!(findings.iter().any(|f| f.severity == Severity::Reject
      && matches!(f.kind, FindingKind::DuplicateAppearance {
        first_row: 1,
        ..
      })));
  }

  #[test]
  fn duplicate_triple_warns_under_dedupe_policy() {
    let mut ds = fixture();
    let dup = ds.character_appearances[0].data;
    ds.character_appearances.push(Row::new(3, dup));

    let options = Options {
      duplicate_appearances: DuplicatePolicy::DedupeAndWarn,
      ..Options::default()
    };
    let findings = validate(&ds, &options);
    assert!(!has_rejects(&findings));
    assert!(findings.iter().any(|f| f.severity == Severity::Warn
      && matches!(f.kind, FindingKind::DuplicateAppearance { .. })));

    let removed = dedupe_appearances(&mut ds);
    assert_eq!(removed, 1);
    assert_eq!(ds.character_appearances.len(), 2);
    // The first occurrence survives.
    assert_eq!(ds.character_appearances[0].pos, 1);
  }

  // ── Chapter numbering ─────────────────────────────────────────────────────

  #[test]
  fn chapter_number_repeats_within_book_rejected() {
    let mut ds = fixture();
    ds.chapters.push(Row::new(3, chapter(3, 1, 2)));

    let findings = validate(&ds, &Options::default());
    assert!(findings.iter().any(|f| matches!(
      f.kind,
      FindingKind::DuplicateChapterNumber {
        book_id:        1,
        chapter_number: 2,
        first_row:      2,
      }
    )));
  }

  #[test]
  fn chapter_number_may_repeat_across_books() {
    let mut ds = fixture();
    ds.books.push(Row::new(2, book(2, "No Tomorrow")));
    ds.chapters.push(Row::new(3, chapter(3, 2, 1)));

    assert_eq!(validate(&ds, &Options::default()), vec![]);
  }

  // ── Parent locations ──────────────────────────────────────────────────────

  #[test]
  fn dangling_parent_location_warns_only() {
    let mut ds = fixture();
    ds.locations.push(Row::new(3, location(22, "Safe house", Some("Moscow"))));

    let findings = validate(&ds, &Options::default());
    assert!(!has_rejects(&findings));
    assert!(findings.iter().any(|f| f.severity == Severity::Warn
      && f.row == 3
      && matches!(&f.kind, FindingKind::UnknownParentLocation { name } if name == "Moscow")));
  }

  #[test]
  fn ambiguous_parent_location_warns() {
    let mut ds = fixture();
    // Two distinct locations named "Paris".
    ds.locations.push(Row::new(3, location(22, "Paris", None)));
    ds.locations.push(Row::new(4, location(23, "Paris", None)));
    ds.locations.push(Row::new(5, location(24, "Gare du Nord", Some("Paris"))));

    let findings = validate(&ds, &Options::default());
    assert!(!has_rejects(&findings));
    assert!(findings.iter().any(|f| matches!(
      &f.kind,
      FindingKind::AmbiguousParentLocation { name, candidates: 2 } if name == "Paris"
    )));
  }
}
