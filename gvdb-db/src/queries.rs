//! Read queries for the cache database.
//!
//! Reads whole collections back into catalog types, in the order they were
//! imported, plus per-table counts.

use gvdb_catalog::types::*;
use rusqlite::Connection;

use crate::operations::OperationError;

// ── Snapshot ────────────────────────────────────────────────────────────────

/// Read every collection back into a [`Snapshot`], in import order.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot, OperationError> {
    Ok(Snapshot {
        studios: list_studios(conn)?,
        actors: list_actors(conn)?,
        stage_names: list_stage_names(conn)?,
        productions: list_productions(conn)?,
        performances: list_performances(conn)?,
        tags: list_tags(conn)?,
        production_tags: list_production_tags(conn)?,
    })
}

pub fn list_studios(conn: &Connection) -> Result<Vec<Studio>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name FROM studios ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok(Studio {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn list_actors(conn: &Connection) -> Result<Vec<Actor>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, actor_tag, gvdb_id, notes, created_at, updated_at
         FROM actors ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Actor {
            id: row.get(0)?,
            actor_tag: row.get(1)?,
            gvdb_id: row.get(2)?,
            notes: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn list_stage_names(conn: &Connection) -> Result<Vec<StageName>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, actor_id, studio_id, stage_name FROM stage_names ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(StageName {
            id: row.get(0)?,
            actor_id: row.get(1)?,
            studio_id: row.get(2)?,
            stage_name: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn list_productions(conn: &Connection) -> Result<Vec<Production>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, code, title, type, studio_id, release_date, created_at,
                updated_at, parent_id, performer_ids, comment
         FROM productions ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ProductionRow {
            id: row.get(0)?,
            code: row.get(1)?,
            title: row.get(2)?,
            production_type: row.get(3)?,
            studio_id: row.get(4)?,
            release_date: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
            parent_id: row.get(8)?,
            performer_ids: row.get(9)?,
            comment: row.get(10)?,
        })
    })?;

    let mut productions = Vec::new();
    for row in rows {
        productions.push(row?.into_production()?);
    }
    Ok(productions)
}

pub fn list_performances(conn: &Connection) -> Result<Vec<Performance>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, production_id, stage_name_id, role, performer_type
         FROM performances ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], row_to_performance)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn list_tags(conn: &Connection) -> Result<Vec<Tag>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, category, name, display_name FROM tags ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut tags = Vec::new();
    for row in rows {
        let (id, category, name, display_name) = row?;
        let category = TagCategory::from_str_loose(&category).ok_or(
            OperationError::InvalidValue {
                table: "tags",
                column: "category",
                value: category,
            },
        )?;
        tags.push(Tag {
            id,
            category,
            name,
            display_name,
        });
    }
    Ok(tags)
}

pub fn list_production_tags(conn: &Connection) -> Result<Vec<ProductionTag>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT production_id, tag_id FROM production_tags ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ProductionTag {
            production_id: row.get(0)?,
            tag_id: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Count rows in one catalog table. Unknown table names are rejected.
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64, OperationError> {
    if !gvdb_catalog::TABLES.contains(&table) {
        return Err(OperationError::NotFound {
            entity_type: "table".to_string(),
            id: table.to_string(),
        });
    }
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(count)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

struct ProductionRow {
    id: i64,
    code: String,
    title: Option<String>,
    production_type: String,
    studio_id: i64,
    release_date: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    parent_id: Option<i64>,
    performer_ids: Option<String>,
    comment: Option<String>,
}

impl ProductionRow {
    fn into_production(self) -> Result<Production, OperationError> {
        let production_type = ProductionType::from_str_loose(&self.production_type).ok_or(
            OperationError::InvalidValue {
                table: "productions",
                column: "type",
                value: self.production_type.clone(),
            },
        )?;
        let performer_ids = self
            .performer_ids
            .as_deref()
            .map(serde_json::from_str::<Vec<i64>>)
            .transpose()?;
        Ok(Production {
            id: self.id,
            code: self.code,
            title: self.title,
            production_type,
            studio_id: self.studio_id,
            release_date: self.release_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
            parent_id: self.parent_id,
            performer_ids,
            comment: self.comment,
        })
    }
}

fn row_to_performance(row: &rusqlite::Row<'_>) -> rusqlite::Result<Performance> {
    let role: Option<String> = row.get(3)?;
    let performer_type: String = row.get(4)?;
    Ok(Performance {
        id: row.get(0)?,
        production_id: row.get(1)?,
        stage_name_id: row.get(2)?,
        role: role.map(Role::from),
        performer_type: PerformerType::from_str_loose(&performer_type),
    })
}
