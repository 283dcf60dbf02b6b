//! SQL schema for the corpus database.
//!
//! Executed once against a freshly created file. Foreign keys are
//! enforced, closed vocabularies are CHECK constraints, and every
//! foreign-key column plus the frequently filtered columns (role,
//! location_type, organization_type, predicate, category) is indexed.

/// Full schema DDL, in dependency order.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE books (
    id               INTEGER PRIMARY KEY,
    title            TEXT NOT NULL,
    author           TEXT,
    publisher        TEXT,
    publication_date TEXT,
    language         TEXT,
    page_count       INTEGER,
    chapter_count    INTEGER
);

CREATE TABLE chapters (
    id             INTEGER PRIMARY KEY,
    book_id        INTEGER NOT NULL REFERENCES books(id),
    chapter_number INTEGER NOT NULL,
    title          TEXT,
    UNIQUE (book_id, chapter_number)
);

CREATE TABLE characters (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL,
    full_name   TEXT,
    aliases     TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    description TEXT,
    role        TEXT CHECK (role IN
                  ('protagonist','supporting','antagonist','minor','mentioned')),
    nationality TEXT,
    gender      TEXT CHECK (gender IN ('female','male','other','unknown')),
    first_appearance_book_id INTEGER REFERENCES books(id)
);

CREATE TABLE locations (
    id              INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    location_type   TEXT,
    parent_location TEXT,   -- name-keyed, best-effort; intentionally no FK
    description     TEXT,
    is_real_place   INTEGER   -- 0/1
);

CREATE TABLE organizations (
    id                INTEGER PRIMARY KEY,
    name              TEXT NOT NULL,
    aliases           TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    organization_type TEXT,
    description       TEXT,
    first_appearance_book_id INTEGER REFERENCES books(id)
);

CREATE TABLE glossary (
    id          INTEGER PRIMARY KEY,
    term        TEXT NOT NULL,
    category    TEXT,
    description TEXT
);

CREATE TABLE characters_appearances (
    book_id      INTEGER NOT NULL REFERENCES books(id),
    chapter_id   INTEGER NOT NULL REFERENCES chapters(id),
    character_id INTEGER NOT NULL REFERENCES characters(id),
    PRIMARY KEY (book_id, chapter_id, character_id)
);

CREATE TABLE locations_appearances (
    book_id     INTEGER NOT NULL REFERENCES books(id),
    chapter_id  INTEGER NOT NULL REFERENCES chapters(id),
    location_id INTEGER NOT NULL REFERENCES locations(id),
    PRIMARY KEY (book_id, chapter_id, location_id)
);

CREATE TABLE relationships (
    id           INTEGER PRIMARY KEY,
    book_id      INTEGER NOT NULL REFERENCES books(id),
    chapter_id   INTEGER NOT NULL REFERENCES chapters(id),
    subject_type TEXT NOT NULL CHECK
                   (subject_type IN ('character','organization','location')),
    subject_id   INTEGER NOT NULL,
    subject_name TEXT,
    predicate    TEXT NOT NULL,
    object_type  TEXT NOT NULL CHECK
                   (object_type IN ('character','organization','location')),
    object_id    INTEGER NOT NULL,
    object_name  TEXT
);

CREATE INDEX chapters_book_idx       ON chapters(book_id);
CREATE INDEX characters_book_idx     ON characters(first_appearance_book_id);
CREATE INDEX characters_role_idx     ON characters(role);
CREATE INDEX locations_type_idx      ON locations(location_type);
CREATE INDEX organizations_book_idx  ON organizations(first_appearance_book_id);
CREATE INDEX organizations_type_idx  ON organizations(organization_type);
CREATE INDEX glossary_category_idx   ON glossary(category);

CREATE INDEX characters_appearances_chapter_idx
    ON characters_appearances(chapter_id);
CREATE INDEX characters_appearances_character_idx
    ON characters_appearances(character_id);
CREATE INDEX locations_appearances_chapter_idx
    ON locations_appearances(chapter_id);
CREATE INDEX locations_appearances_location_idx
    ON locations_appearances(location_id);

CREATE INDEX relationships_book_idx      ON relationships(book_id);
CREATE INDEX relationships_chapter_idx   ON relationships(chapter_id);
CREATE INDEX relationships_subject_idx   ON relationships(subject_type, subject_id);
CREATE INDEX relationships_object_idx    ON relationships(object_type, object_id);
CREATE INDEX relationships_predicate_idx ON relationships(predicate);
";
