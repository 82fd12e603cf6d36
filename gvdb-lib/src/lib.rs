//! Query engine for browsing the production catalog.
//!
//! A loaded [`Snapshot`](gvdb_catalog::Snapshot) is indexed once into a
//! [`Store`]; the [`Catalog`] facade answers every browse query over it
//! (filtered and sorted pages, production detail, actor statistics,
//! suggestions). [`BrowseSession`] adds one-time async loading from a
//! [`SnapshotSource`] and request sequencing for interactive callers.

pub mod catalog;
pub mod detail;
pub mod error;
pub mod filter;
pub mod integrity;
pub mod options;
pub mod page;
pub mod session;
pub mod settings;
pub mod sort;
pub mod source;
pub mod stats;
pub mod store;
pub mod timestamp;
pub mod util;

pub use catalog::{ActorRow, ActorSuggestion, Catalog, ProductionRow, SUGGESTION_LIMIT};
pub use detail::{CreditedActor, ProductionDetail, TagBuckets};
pub use error::{LoadError, NotFoundError, QueryError};
pub use filter::{ActorFilters, ProductionFilters};
pub use integrity::{DanglingReference, ReferenceProblem};
pub use options::{FilterOptions, StudioOption, TagOption, TagOptions};
pub use page::{DEFAULT_PAGE_SIZE, Page, Pagination};
pub use session::{BrowseSession, RequestSequencer, RequestTicket, Sequenced};
pub use sort::{ActorSortField, ProductionSortField, Sort, SortOrder, SortState};
pub use source::{JsonDirSource, SnapshotSource, SqliteSource};
pub use stats::{ActorStats, RoleCounts, StudioDetail};
pub use store::{Store, StoreCounts};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod test_fixtures;
