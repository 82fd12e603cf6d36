//! SQLite persistence layer for catalog snapshots.
//!
//! The persistent-storage variant of the record store: the same seven
//! collections, cached in SQLite (via rusqlite with bundled feature) so a
//! session can start without re-reading the JSON export.

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    clear_snapshot, import_snapshot, insert_actor, insert_performance, insert_production,
    insert_production_tag, insert_stage_name, insert_studio, insert_tag, ImportStats,
    OperationError,
};
pub use queries::{
    count_rows, list_actors, list_performances, list_production_tags, list_productions,
    list_stage_names, list_studios, list_tags, load_snapshot,
};
pub use schema::{open_database, open_memory, SchemaError};
