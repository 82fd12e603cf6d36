pub(crate) mod browse;
pub(crate) mod config;
pub(crate) mod data;
pub(crate) mod detail;
pub(crate) mod lookup;

use std::path::PathBuf;

use gvdb_lib::settings;
use gvdb_lib::{BrowseSession, JsonDirSource, SqliteSource};
use serde::Serialize;

use crate::CliError;
use crate::cli_types::Cli;

/// Resolved global options shared by every command.
pub(crate) struct Context {
    pub data_dir: PathBuf,
    /// SQLite cache path when `--db` was given.
    pub db: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: settings::resolve_snapshot_dir(cli.data_dir.clone()),
            db: cli.db.clone().map(settings::resolve_cache_db),
            json: cli.json,
        }
    }

    /// The cache path for `import`, whether or not `--db` was given.
    pub(crate) fn cache_db(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| settings::resolve_cache_db(None))
    }

    pub(crate) fn session(&self) -> BrowseSession {
        match &self.db {
            Some(db) => BrowseSession::new(SqliteSource::new(db, &self.data_dir)),
            None => BrowseSession::new(JsonDirSource::new(&self.data_dir)),
        }
    }

    /// Print `value` as pretty JSON on stdout.
    pub(crate) fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

/// Optional text, or a dash.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}
