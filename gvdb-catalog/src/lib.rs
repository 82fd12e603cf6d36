//! Catalog data model types and bulk snapshot I/O.
//!
//! This crate defines the record types shared by every storage variant
//! without any database dependencies. Consumers can use these types directly
//! for serialization, display, or passing to `gvdb-db` for persistence.

pub mod snapshot;
pub mod types;

pub use snapshot::{load_snapshot, load_table, write_snapshot, SnapshotError, TABLES};
pub use types::*;
