//! SQLite schema creation and rebuild.
//!
//! The tables mirror the snapshot collections one-to-one. Foreign keys are
//! indexed but not enforced: exports may carry dangling references, which
//! the browsing layer skips rather than rejects.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Current schema version. A cache stamped with any other version is
/// dropped and rebuilt; its rows are re-imported from the snapshot.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? != CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a cache database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    match get_schema_version(&conn)? {
        CURRENT_VERSION => {}
        0 => create_schema(&conn)?,
        _ => rebuild(&conn)?,
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Drop every table and recreate the current schema. The cache holds nothing
/// that the snapshot export can't restore.
fn rebuild(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS production_tags;
         DROP TABLE IF EXISTS tags;
         DROP TABLE IF EXISTS performances;
         DROP TABLE IF EXISTS productions;
         DROP TABLE IF EXISTS stage_names;
         DROP TABLE IF EXISTS actors;
         DROP TABLE IF EXISTS studios;
         DROP TABLE IF EXISTS schema_version;",
    )?;
    create_schema(conn)
}

// Record ids are indexed but not keys: an export may repeat an id, and every
// row is kept in import order (rowid) just as the JSON snapshot keeps it.
const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS studios (
    id INTEGER NOT NULL,
    name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_studios_id ON studios(id);
CREATE INDEX IF NOT EXISTS idx_studios_name ON studios(name);

CREATE TABLE IF NOT EXISTS actors (
    id INTEGER NOT NULL,
    actor_tag TEXT NOT NULL,
    gvdb_id TEXT,
    notes TEXT,
    created_at TEXT,
    updated_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_actors_id ON actors(id);
CREATE INDEX IF NOT EXISTS idx_actors_tag ON actors(actor_tag);

-- Per-studio credited names
CREATE TABLE IF NOT EXISTS stage_names (
    id INTEGER NOT NULL,
    actor_id INTEGER NOT NULL,
    studio_id INTEGER NOT NULL,
    stage_name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_stage_names_id ON stage_names(id);
CREATE INDEX IF NOT EXISTS idx_stage_names_actor ON stage_names(actor_id);
CREATE INDEX IF NOT EXISTS idx_stage_names_studio ON stage_names(studio_id);

-- Singles, albums and album segments
CREATE TABLE IF NOT EXISTS productions (
    id INTEGER NOT NULL,
    code TEXT NOT NULL,
    title TEXT,
    type TEXT NOT NULL CHECK (type IN ('single', 'album', 'segment')),
    studio_id INTEGER NOT NULL,
    release_date TEXT,
    created_at TEXT,
    updated_at TEXT,
    parent_id INTEGER,
    performer_ids TEXT,
    comment TEXT
);
CREATE INDEX IF NOT EXISTS idx_productions_id ON productions(id);
CREATE INDEX IF NOT EXISTS idx_productions_code ON productions(code);
CREATE INDEX IF NOT EXISTS idx_productions_studio ON productions(studio_id);
CREATE INDEX IF NOT EXISTS idx_productions_parent ON productions(parent_id);

CREATE TABLE IF NOT EXISTS performances (
    id INTEGER NOT NULL,
    production_id INTEGER NOT NULL,
    stage_name_id INTEGER NOT NULL,
    role TEXT,
    performer_type TEXT NOT NULL DEFAULT 'named'
);
CREATE INDEX IF NOT EXISTS idx_performances_id ON performances(id);
CREATE INDEX IF NOT EXISTS idx_performances_production ON performances(production_id);
CREATE INDEX IF NOT EXISTS idx_performances_stage_name ON performances(stage_name_id);

CREATE TABLE IF NOT EXISTS tags (
    id INTEGER NOT NULL,
    category TEXT NOT NULL,
    name TEXT NOT NULL,
    display_name TEXT
);
CREATE INDEX IF NOT EXISTS idx_tags_id ON tags(id);
CREATE INDEX IF NOT EXISTS idx_tags_category ON tags(category, name);

CREATE TABLE IF NOT EXISTS production_tags (
    production_id INTEGER NOT NULL,
    tag_id INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_production_tags_production ON production_tags(production_id);
CREATE INDEX IF NOT EXISTS idx_production_tags_tag ON production_tags(tag_id);
"#;
