//! Shared settings: data locations and browse preferences.
//!
//! The settings file is `<config_dir>/gvdb/settings.toml`:
//!
//! ```toml
//! [data]
//! snapshot_dir = "/srv/gvdb/export"
//! cache_db = "/var/cache/gvdb/catalog.db"
//!
//! [browse]
//! page_size = 50
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::page::DEFAULT_PAGE_SIZE;

/// Snapshot directory used when nothing else is configured.
pub const DEFAULT_SNAPSHOT_DIR: &str = "data";

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gvdb").join("settings.toml")
}

/// Resolve the snapshot directory:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `data.snapshot_dir`
/// 3. `./data`
pub fn resolve_snapshot_dir(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_snapshot_dir_in(&settings_path(), cli_override)
}

/// Resolve the SQLite cache path: CLI override, then `data.cache_db`, then
/// `<cache_dir>/gvdb/catalog.db`.
pub fn resolve_cache_db(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = read_string(&settings_path(), "data", "cache_db") {
        return PathBuf::from(p);
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gvdb")
        .join("catalog.db")
}

/// Resolve the browse page size: CLI flag, then `browse.page_size`, then 30.
/// Zero is never returned.
pub fn resolve_page_size(cli_override: Option<usize>) -> usize {
    resolve_page_size_in(&settings_path(), cli_override)
}

fn resolve_snapshot_dir_in(settings: &Path, cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    match read_string(settings, "data", "snapshot_dir") {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(DEFAULT_SNAPSHOT_DIR),
    }
}

fn resolve_page_size_in(settings: &Path, cli_override: Option<usize>) -> usize {
    let saved = || {
        let value = read_value(settings, "browse", "page_size")?;
        usize::try_from(value.as_integer()?).ok()
    };
    cli_override
        .filter(|&n| n > 0)
        .or_else(|| saved().filter(|&n| n > 0))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

fn read_value(settings: &Path, section: &str, key: &str) -> Option<toml::Value> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    doc.get(section)?.get(key).cloned()
}

fn read_string(settings: &Path, section: &str, key: &str) -> Option<String> {
    let value = read_value(settings, section, key)?;
    let s = value.as_str()?;
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Save (or clear) the snapshot directory.
pub fn save_snapshot_dir(path: Option<&Path>) -> io::Result<()> {
    let value = path.map(|p| toml::Value::String(p.to_string_lossy().into_owned()));
    save_value(&settings_path(), "data", "snapshot_dir", value)
}

/// Save (or clear) the SQLite cache path.
pub fn save_cache_db(path: Option<&Path>) -> io::Result<()> {
    let value = path.map(|p| toml::Value::String(p.to_string_lossy().into_owned()));
    save_value(&settings_path(), "data", "cache_db", value)
}

/// Set or remove `[section] key` in the settings file.
///
/// Uses `toml::Value` for a surgical update so unrelated keys are preserved.
fn save_value(
    settings: &Path,
    section: &str,
    key: &str,
    value: Option<toml::Value>,
) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let section_value = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let section_table = section_value
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;

    match value {
        Some(v) => {
            section_table.insert(key.to_string(), v);
        }
        None => {
            section_table.remove(key);
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_dir_resolution_chain() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("gvdb").join("settings.toml");

        assert_eq!(resolve_snapshot_dir_in(&settings, None), PathBuf::from("data"));

        save_value(
            &settings,
            "data",
            "snapshot_dir",
            Some(toml::Value::String("/srv/export".into())),
        )
        .unwrap();
        assert_eq!(resolve_snapshot_dir_in(&settings, None), PathBuf::from("/srv/export"));
        assert_eq!(
            resolve_snapshot_dir_in(&settings, Some(PathBuf::from("cli"))),
            PathBuf::from("cli")
        );
    }

    #[test]
    fn page_size_ignores_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("settings.toml");
        assert_eq!(resolve_page_size_in(&settings, None), DEFAULT_PAGE_SIZE);

        save_value(&settings, "browse", "page_size", Some(toml::Value::Integer(50))).unwrap();
        assert_eq!(resolve_page_size_in(&settings, None), 50);
        assert_eq!(resolve_page_size_in(&settings, Some(10)), 10);
        // A zero flag falls through to the saved value
        assert_eq!(resolve_page_size_in(&settings, Some(0)), 50);

        save_value(&settings, "browse", "page_size", Some(toml::Value::Integer(0))).unwrap();
        assert_eq!(resolve_page_size_in(&settings, Some(0)), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn save_preserves_other_keys_and_clears() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = tmp.path().join("settings.toml");
        std::fs::write(&settings, "[browse]\npage_size = 12\n").unwrap();

        save_value(
            &settings,
            "data",
            "snapshot_dir",
            Some(toml::Value::String("x".into())),
        )
        .unwrap();
        assert_eq!(resolve_page_size_in(&settings, None), 12);
        assert_eq!(read_string(&settings, "data", "snapshot_dir").as_deref(), Some("x"));

        save_value(&settings, "data", "snapshot_dir", None).unwrap();
        assert_eq!(read_string(&settings, "data", "snapshot_dir"), None);
        assert!(!settings.with_extension("toml.tmp").exists());
    }
}
