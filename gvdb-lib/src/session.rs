//! Async browse session: one-time bulk load plus "last query wins"
//! request sequencing.
//!
//! The catalog is read-only after load, so queries never lock. They run on
//! blocking tasks and are never cancelled; a caller that issued a newer
//! request simply drops stale responses by checking [`BrowseSession::is_latest`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::OnceCell;

use crate::catalog::{ActorRow, ActorSuggestion, Catalog, ProductionRow};
use crate::detail::ProductionDetail;
use crate::error::{LoadError, QueryError};
use crate::filter::{ActorFilters, ProductionFilters};
use crate::page::{Page, Pagination};
use crate::sort::{ActorSortField, ProductionSortField, Sort};
use crate::source::SnapshotSource;
use crate::stats::ActorStats;

/// Identifies one issued request. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing request tickets.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    last: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> RequestTicket {
        RequestTicket(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.last.load(Ordering::SeqCst) == ticket.0
    }
}

/// A query result tagged with the ticket of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequenced<T> {
    pub ticket: RequestTicket,
    pub value: T,
}

pub struct BrowseSession {
    source: Arc<dyn SnapshotSource>,
    catalog: OnceCell<Arc<Catalog>>,
    sequencer: RequestSequencer,
}

impl BrowseSession {
    pub fn new(source: impl SnapshotSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            source,
            catalog: OnceCell::new(),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Fetch and index the snapshot. Concurrent callers share one load; once
    /// it has succeeded later calls return immediately. A failed load leaves
    /// the session unloaded so it can be retried.
    pub async fn load_all(&self) -> Result<Arc<Catalog>, LoadError> {
        let catalog = self
            .catalog
            .get_or_try_init(|| async {
                let source = Arc::clone(&self.source);
                log::info!("Loading {}", source.describe());
                let catalog = tokio::task::spawn_blocking(move || {
                    source.fetch().map(Catalog::from_snapshot)
                })
                .await
                .map_err(|e| LoadError::task(e.to_string()))??;
                Ok::<_, LoadError>(Arc::new(catalog))
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.initialized()
    }

    /// The loaded catalog, or `NotLoaded` before `load_all` has succeeded.
    pub fn catalog(&self) -> Result<Arc<Catalog>, QueryError> {
        self.catalog.get().cloned().ok_or(QueryError::NotLoaded)
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.sequencer.is_latest(ticket)
    }

    pub async fn query_actors(
        &self,
        filters: ActorFilters,
        sort: Sort<ActorSortField>,
        pagination: Pagination,
    ) -> Result<Sequenced<Page<ActorRow>>, QueryError> {
        self.run(move |c| Ok(c.query_actors(&filters, &sort, pagination)))
            .await
    }

    pub async fn query_productions(
        &self,
        filters: ProductionFilters,
        sort: Sort<ProductionSortField>,
        pagination: Pagination,
    ) -> Result<Sequenced<Page<ProductionRow>>, QueryError> {
        self.run(move |c| Ok(c.query_productions(&filters, &sort, pagination)))
            .await
    }

    pub async fn production_detail(
        &self,
        id: i64,
    ) -> Result<Sequenced<ProductionDetail>, QueryError> {
        self.run(move |c| Ok(c.production_detail(id)?)).await
    }

    pub async fn actor_stats(&self, id: i64) -> Result<Sequenced<ActorStats>, QueryError> {
        self.run(move |c| Ok(c.actor_stats(id)?)).await
    }

    pub async fn search_actor_suggestions(
        &self,
        query: String,
    ) -> Result<Sequenced<Vec<ActorSuggestion>>, QueryError> {
        self.run(move |c| Ok(c.search_actor_suggestions(&query))).await
    }

    pub async fn segments(
        &self,
        album_id: i64,
    ) -> Result<Sequenced<Vec<ProductionRow>>, QueryError> {
        self.run(move |c| Ok(c.segments(album_id)?)).await
    }

    /// Issue a ticket, then run `query` against the catalog off the async
    /// executor.
    async fn run<T, F>(&self, query: F) -> Result<Sequenced<T>, QueryError>
    where
        T: Send + 'static,
        F: FnOnce(&Catalog) -> Result<T, QueryError> + Send + 'static,
    {
        let ticket = self.sequencer.next();
        let catalog = self.catalog()?;
        let value = tokio::task::spawn_blocking(move || query(catalog.as_ref()))
            .await
            .map_err(|e| QueryError::task(e.to_string()))??;
        Ok(Sequenced { ticket, value })
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
