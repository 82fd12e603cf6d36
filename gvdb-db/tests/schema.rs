use gvdb_db::open_memory;
use gvdb_db::schema::{create_schema, get_schema_version, open_database, CURRENT_VERSION};
use tempfile::TempDir;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
}

#[test]
fn reopen_on_disk_keeps_version() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cache.db");
    drop(open_database(&path).unwrap());
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "studios",
        "actors",
        "stage_names",
        "productions",
        "performances",
        "tags",
        "production_tags",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn lookup_indexes_exist() {
    let conn = open_memory().unwrap();
    for index in [
        "idx_stage_names_actor",
        "idx_performances_production",
        "idx_performances_stage_name",
        "idx_productions_parent",
    ] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1)",
                [index],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "index '{}' should exist", index);
    }
}

#[test]
fn foreign_version_is_rebuilt() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cache.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute("INSERT INTO studios (id, name) VALUES (1, 'Stale')", [])
            .unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (99)", [])
            .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    let studios: i64 = conn
        .query_row("SELECT COUNT(*) FROM studios", [], |row| row.get(0))
        .unwrap();
    assert_eq!(studios, 0);
}

#[test]
fn record_ids_are_not_unique_keys() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO studios (id, name) VALUES (1, 'Same');
         INSERT INTO studios (id, name) VALUES (1, 'Same');",
    )
    .unwrap();
}
