use thiserror::Error;

/// The bulk snapshot could not be fetched or parsed. Fatal to a session:
/// there is no partial-data fallback.
#[derive(Debug, Error)]
pub enum LoadError {
    /// JSON snapshot directory could not be read
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] gvdb_catalog::SnapshotError),

    /// Cache database could not be opened or created
    #[error("Database schema error: {0}")]
    Schema(#[from] gvdb_db::SchemaError),

    /// Cache database could not be read or written
    #[error("Database error: {0}")]
    Database(#[from] gvdb_db::OperationError),

    /// Loader task failed to run to completion
    #[error("Load task failed: {0}")]
    Task(String),
}

impl LoadError {
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }
}

/// A requested record id has no match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: i64,
}

impl NotFoundError {
    pub fn new(entity: &'static str, id: i64) -> Self {
        Self { entity, id }
    }
}

/// Errors surfaced by a browse session query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// `load_all` has not completed successfully yet
    #[error("Catalog is not loaded")]
    NotLoaded,

    /// Loading failed while the query waited for it
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Query task panicked or was aborted
    #[error("Query task failed: {0}")]
    Task(String),
}

impl QueryError {
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }
}
