//! JSON loading for bulk catalog snapshots.
//!
//! A snapshot directory holds one JSON file per collection, as written by
//! the database export: `studios.json`, `actors.json`, `stage_names.json`,
//! `productions.json`, `performances.json`, `tags.json` and
//! `production_tags.json`.

use crate::types::Snapshot;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Unexpected layout in {path}: {reason}")]
    Layout { path: String, reason: String },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// Collection names in load order. Each is also the file stem.
pub const TABLES: [&str; 7] = [
    "studios",
    "actors",
    "stage_names",
    "productions",
    "performances",
    "tags",
    "production_tags",
];

/// Load every collection from a snapshot directory.
///
/// Expected structure:
/// ```text
/// data_dir/
///   studios.json
///   actors.json
///   stage_names.json
///   productions.json
///   performances.json
///   tags.json
///   production_tags.json
/// ```
///
/// A missing or malformed file fails the whole load; there is no partial
/// snapshot.
pub fn load_snapshot(dir: &Path) -> Result<Snapshot, SnapshotError> {
    if !dir.is_dir() {
        return Err(SnapshotError::DirNotFound(dir.display().to_string()));
    }

    Ok(Snapshot {
        studios: load_table(dir, "studios")?,
        actors: load_table(dir, "actors")?,
        stage_names: load_table(dir, "stage_names")?,
        productions: load_table(dir, "productions")?,
        performances: load_table(dir, "performances")?,
        tags: load_table(dir, "tags")?,
        production_tags: load_table(dir, "production_tags")?,
    })
}

/// Load a single collection file `<dir>/<table>.json`.
pub fn load_table<T: DeserializeOwned>(dir: &Path, table: &str) -> Result<Vec<T>, SnapshotError> {
    let path = dir.join(format!("{table}.json"));
    let contents = std::fs::read_to_string(&path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_table(&contents, table).map_err(|e| match e {
        TableError::Json(source) => SnapshotError::Parse {
            path: path.display().to_string(),
            source,
        },
        TableError::Layout(reason) => SnapshotError::Layout {
            path: path.display().to_string(),
            reason,
        },
    })
}

/// Write a snapshot back out as a directory of pretty-printed JSON files.
pub fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    std::fs::create_dir_all(dir).map_err(|e| SnapshotError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    write_table(dir, "studios", &snapshot.studios)?;
    write_table(dir, "actors", &snapshot.actors)?;
    write_table(dir, "stage_names", &snapshot.stage_names)?;
    write_table(dir, "productions", &snapshot.productions)?;
    write_table(dir, "performances", &snapshot.performances)?;
    write_table(dir, "tags", &snapshot.tags)?;
    write_table(dir, "production_tags", &snapshot.production_tags)?;
    Ok(())
}

fn write_table<T: serde::Serialize>(
    dir: &Path,
    table: &str,
    rows: &[T],
) -> Result<(), SnapshotError> {
    let path = dir.join(format!("{table}.json"));
    let json = serde_json::to_string_pretty(rows).map_err(|e| SnapshotError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    std::fs::write(&path, json).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

enum TableError {
    Json(serde_json::Error),
    Layout(String),
}

/// Parse a collection document: either a bare array, or an object holding
/// the array under the table name (or under its only key).
fn parse_table<T: DeserializeOwned>(contents: &str, table: &str) -> Result<Vec<T>, TableError> {
    let value: serde_json::Value = serde_json::from_str(contents).map_err(TableError::Json)?;
    let rows = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => {
            if let Some(rows) = map.remove(table) {
                rows
            } else if map.len() == 1 {
                map.into_iter()
                    .next()
                    .map(|(_, v)| v)
                    .unwrap_or(serde_json::Value::Array(Vec::new()))
            } else if map.is_empty() {
                serde_json::Value::Array(Vec::new())
            } else {
                return Err(TableError::Layout(format!(
                    "object has no \"{table}\" key and {} candidates",
                    map.len()
                )));
            }
        }
        other => {
            return Err(TableError::Layout(format!(
                "expected an array or object, found {}",
                json_kind(&other)
            )));
        }
    };
    serde_json::from_value(rows).map_err(TableError::Json)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
