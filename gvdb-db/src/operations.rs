//! Write operations: bulk import of a snapshot into the cache database.

use gvdb_catalog::types::*;
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON column error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value in {table}.{column}: '{value}'")]
    InvalidValue {
        table: &'static str,
        column: &'static str,
        value: String,
    },
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

/// Counts of rows written by [`import_snapshot`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub studios: usize,
    pub actors: usize,
    pub stage_names: usize,
    pub productions: usize,
    pub performances: usize,
    pub tags: usize,
    pub production_tags: usize,
}

impl ImportStats {
    pub fn total(&self) -> usize {
        self.studios
            + self.actors
            + self.stage_names
            + self.productions
            + self.performances
            + self.tags
            + self.production_tags
    }
}

/// Replace the database contents with a snapshot, in one transaction.
///
/// Tables are cleared first, so importing the same snapshot twice leaves
/// the same rows behind. Rows are written in snapshot order, repeated ids
/// included.
pub fn import_snapshot(
    conn: &Connection,
    snapshot: &Snapshot,
) -> Result<ImportStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    clear_snapshot(&tx)?;

    let mut stats = ImportStats::default();
    for studio in &snapshot.studios {
        insert_studio(&tx, studio)?;
        stats.studios += 1;
    }
    for actor in &snapshot.actors {
        insert_actor(&tx, actor)?;
        stats.actors += 1;
    }
    for stage_name in &snapshot.stage_names {
        insert_stage_name(&tx, stage_name)?;
        stats.stage_names += 1;
    }
    for production in &snapshot.productions {
        insert_production(&tx, production)?;
        stats.productions += 1;
    }
    for performance in &snapshot.performances {
        insert_performance(&tx, performance)?;
        stats.performances += 1;
    }
    for tag in &snapshot.tags {
        insert_tag(&tx, tag)?;
        stats.tags += 1;
    }
    for link in &snapshot.production_tags {
        insert_production_tag(&tx, link)?;
        stats.production_tags += 1;
    }

    tx.commit()?;
    Ok(stats)
}

/// Delete every catalog row (schema and version history are kept).
pub fn clear_snapshot(conn: &Connection) -> Result<(), OperationError> {
    conn.execute_batch(
        "DELETE FROM production_tags;
         DELETE FROM tags;
         DELETE FROM performances;
         DELETE FROM productions;
         DELETE FROM stage_names;
         DELETE FROM actors;
         DELETE FROM studios;",
    )?;
    Ok(())
}

// ── Row Inserts ─────────────────────────────────────────────────────────────

pub fn insert_studio(conn: &Connection, studio: &Studio) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO studios (id, name) VALUES (?1, ?2)",
        params![studio.id, studio.name],
    )?;
    Ok(())
}

pub fn insert_actor(conn: &Connection, actor: &Actor) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO actors (id, actor_tag, gvdb_id, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            actor.id,
            actor.actor_tag,
            actor.gvdb_id,
            actor.notes,
            actor.created_at,
            actor.updated_at,
        ],
    )?;
    Ok(())
}

pub fn insert_stage_name(conn: &Connection, stage_name: &StageName) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO stage_names (id, actor_id, studio_id, stage_name) VALUES (?1, ?2, ?3, ?4)",
        params![
            stage_name.id,
            stage_name.actor_id,
            stage_name.studio_id,
            stage_name.stage_name,
        ],
    )?;
    Ok(())
}

/// Insert a production. The album cast list is stored as a JSON array.
pub fn insert_production(conn: &Connection, production: &Production) -> Result<(), OperationError> {
    let performer_ids = production
        .performer_ids
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    conn.execute(
        "INSERT INTO productions (id, code, title, type, studio_id, release_date,
             created_at, updated_at, parent_id, performer_ids, comment)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            production.id,
            production.code,
            production.title,
            production.production_type.as_str(),
            production.studio_id,
            production.release_date,
            production.created_at,
            production.updated_at,
            production.parent_id,
            performer_ids,
            production.comment,
        ],
    )?;
    Ok(())
}

pub fn insert_performance(
    conn: &Connection,
    performance: &Performance,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO performances (id, production_id, stage_name_id, role, performer_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            performance.id,
            performance.production_id,
            performance.stage_name_id,
            performance.role.as_ref().map(Role::as_str),
            performance.performer_type.as_str(),
        ],
    )?;
    Ok(())
}

pub fn insert_tag(conn: &Connection, tag: &Tag) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO tags (id, category, name, display_name) VALUES (?1, ?2, ?3, ?4)",
        params![tag.id, tag.category.as_str(), tag.name, tag.display_name],
    )?;
    Ok(())
}

pub fn insert_production_tag(
    conn: &Connection,
    link: &ProductionTag,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO production_tags (production_id, tag_id) VALUES (?1, ?2)",
        params![link.production_id, link.tag_id],
    )?;
    Ok(())
}
