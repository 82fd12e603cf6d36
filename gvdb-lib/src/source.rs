//! Where a session's bulk snapshot comes from.

use std::path::{Path, PathBuf};

use gvdb_catalog::Snapshot;
use gvdb_db::ImportStats;

use crate::error::LoadError;

/// A provider of the complete catalog snapshot.
///
/// `fetch` is blocking; sessions run it on a blocking task. A failure means
/// there is no data at all, never partial data.
pub trait SnapshotSource: Send + Sync {
    /// Human-readable origin, for logs and status lines.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Snapshot, LoadError>;
}

/// Reads the seven JSON table files from a directory.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotSource for JsonDirSource {
    fn describe(&self) -> String {
        format!("JSON snapshot at {}", self.dir.display())
    }

    fn fetch(&self) -> Result<Snapshot, LoadError> {
        let snapshot = gvdb_catalog::load_snapshot(&self.dir)?;
        log::info!(
            "Loaded {} records from {}",
            snapshot.record_count(),
            self.dir.display()
        );
        Ok(snapshot)
    }
}

/// Reads the snapshot from a SQLite cache, importing the JSON directory
/// first when the cache holds no studios.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    db_path: PathBuf,
    json_dir: PathBuf,
}

impl SqliteSource {
    pub fn new(db_path: impl Into<PathBuf>, json_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            json_dir: json_dir.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Replace the cache contents with the JSON directory's snapshot.
    pub fn import(&self) -> Result<ImportStats, LoadError> {
        let snapshot = gvdb_catalog::load_snapshot(&self.json_dir)?;
        let conn = gvdb_db::open_database(&self.db_path)?;
        let stats = gvdb_db::import_snapshot(&conn, &snapshot)?;
        log::info!(
            "Imported {} records into {}",
            stats.total(),
            self.db_path.display()
        );
        Ok(stats)
    }
}

impl SnapshotSource for SqliteSource {
    fn describe(&self) -> String {
        format!("SQLite cache at {}", self.db_path.display())
    }

    fn fetch(&self) -> Result<Snapshot, LoadError> {
        let conn = gvdb_db::open_database(&self.db_path)?;
        if gvdb_db::count_rows(&conn, "studios")? == 0 {
            log::info!(
                "Cache {} is empty, importing {}",
                self.db_path.display(),
                self.json_dir.display()
            );
            let snapshot = gvdb_catalog::load_snapshot(&self.json_dir)?;
            gvdb_db::import_snapshot(&conn, &snapshot)?;
        }
        let snapshot = gvdb_db::load_snapshot(&conn)?;
        log::info!(
            "Loaded {} records from {}",
            snapshot.record_count(),
            self.db_path.display()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
