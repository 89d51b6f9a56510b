//! SQLite schema for the case registry.

/// Applied on every open; all statements are idempotent.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Single row of store-wide configuration. The embedding dimension is
-- written on first open and checked on every later one, so a database
-- can never mix vector widths.
CREATE TABLE IF NOT EXISTS store_meta (
  id            INTEGER PRIMARY KEY CHECK (id = 1),
  embedding_dim INTEGER NOT NULL
);

-- Active missing-person records. Rows are never updated in place; the
-- only way out of this table is the found transition.
CREATE TABLE IF NOT EXISTS cases (
  case_id           TEXT PRIMARY KEY,   -- uuid, hyphenated
  owner_id          TEXT NOT NULL,      -- uuid of the reporting account
  name              TEXT NOT NULL,
  age               INTEGER NOT NULL,
  gender            TEXT NOT NULL,      -- 'female' | 'male' | 'other'
  contact_name      TEXT NOT NULL,
  contact_phone     TEXT NOT NULL,
  contact_relation  TEXT,
  aadhaar           TEXT,               -- full number; masked at the edges
  description       TEXT NOT NULL,
  home_address      TEXT,
  last_seen_address TEXT NOT NULL,
  last_seen_date    TEXT NOT NULL,      -- ISO 8601 calendar date
  last_seen_lat     REAL,               -- set together with lon or not at all
  last_seen_lon     REAL,
  photo_path        TEXT NOT NULL,
  profile_links     TEXT NOT NULL,      -- JSON array of {url, title}
  embedding         BLOB NOT NULL,      -- little-endian f32 components
  created_at        TEXT NOT NULL       -- ISO 8601, UTC; assigned by the store
);

-- Resolved records. A row lands here in the same transaction that
-- deletes it from `cases`, so an id is never in both tables.
CREATE TABLE IF NOT EXISTS found_cases (
  case_id           TEXT PRIMARY KEY,
  owner_id          TEXT NOT NULL,
  name              TEXT NOT NULL,
  age               INTEGER NOT NULL,
  gender            TEXT NOT NULL,
  last_seen_address TEXT NOT NULL,
  photo_path        TEXT NOT NULL,
  found_at          TEXT NOT NULL       -- ISO 8601, UTC
);

CREATE INDEX IF NOT EXISTS cases_owner_idx   ON cases(owner_id);
CREATE INDEX IF NOT EXISTS cases_created_idx ON cases(created_at);
CREATE INDEX IF NOT EXISTS found_at_idx      ON found_cases(found_at);

PRAGMA user_version = 1;
";
