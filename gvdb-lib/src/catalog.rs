//! The query surface over one loaded snapshot.

use std::borrow::Cow;
use std::collections::HashSet;

use gvdb_catalog::types::{Actor, Production, Snapshot};
use serde::Serialize;

use crate::detail::{self, CreditedActor, ProductionDetail, TagBuckets};
use crate::error::NotFoundError;
use crate::filter::{self, ActorFilters, ProductionFilters};
use crate::integrity::{self, DanglingReference};
use crate::options::{self, FilterOptions};
use crate::page::{Page, Pagination};
use crate::sort::{ActorSortField, ProductionSortField, Sort, SortKey, Sortable, sort_rows};
use crate::stats::{self, ActorStats};
use crate::store::{Store, StoreCounts};
use crate::util::non_blank;

/// Upper bound on actor suggestions returned per query.
pub const SUGGESTION_LIMIT: usize = 20;

/// An actor browse row: the actor record with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorRow {
    #[serde(flatten)]
    pub actor: Actor,
    #[serde(flatten)]
    pub stats: ActorStats,
}

impl Sortable<ActorSortField> for ActorRow {
    fn sort_key(&self, field: ActorSortField) -> Option<SortKey<'_>> {
        match field {
            ActorSortField::Name => Some(SortKey::Text(Cow::Owned(
                self.actor.actor_tag.to_lowercase(),
            ))),
            ActorSortField::Count => Some(SortKey::Number(i64::from(self.stats.total_productions))),
            ActorSortField::Latest => Some(SortKey::text(self.stats.latest_date.as_deref())),
            ActorSortField::NewestEdit => Some(SortKey::text(self.actor.updated_at.as_deref())),
            ActorSortField::Unknown => None,
        }
    }
}

/// A production browse row: the production record with its credits, tags
/// and studio name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionRow {
    #[serde(flatten)]
    pub production: Production,
    pub actors: Vec<CreditedActor>,
    pub tags: TagBuckets,
    pub studio_name: Option<String>,
}

impl Sortable<ProductionSortField> for ProductionRow {
    fn sort_key(&self, field: ProductionSortField) -> Option<SortKey<'_>> {
        let p = &self.production;
        match field {
            ProductionSortField::Studio => Some(SortKey::text(self.studio_name.as_deref())),
            ProductionSortField::Code => Some(SortKey::text(Some(&p.code))),
            ProductionSortField::Title => Some(SortKey::text(p.title.as_deref())),
            ProductionSortField::Date => Some(SortKey::text(p.release_date.as_deref())),
            ProductionSortField::Updated => Some(SortKey::text(p.updated_at.as_deref())),
            ProductionSortField::Unknown => None,
        }
    }
}

/// One stage name offered while typing an actor filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSuggestion {
    pub stage_name: String,
    pub stage_name_id: i64,
    pub actor_name: String,
    pub actor_id: i64,
    pub studio_name: String,
    pub studio_id: i64,
}

/// An indexed snapshot and every browse query over it.
///
/// Immutable once built, so a single instance can serve concurrent queries.
#[derive(Debug)]
pub struct Catalog {
    store: Store,
    dangling: Vec<DanglingReference>,
}

impl Catalog {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::new(Store::new(snapshot))
    }

    pub fn new(store: Store) -> Self {
        let dangling = integrity::check(&store);
        for reference in &dangling {
            log::warn!("Dangling reference: {reference}");
        }
        let counts = store.counts();
        log::info!(
            "Catalog ready: {} studios, {} actors, {} stage names, {} productions, {} performances, {} tags",
            counts.studios,
            counts.actors,
            counts.stage_names,
            counts.productions,
            counts.performances,
            counts.tags,
        );
        Self { store, dangling }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn counts(&self) -> StoreCounts {
        self.store.counts()
    }

    /// Dangling references found when the catalog was built.
    pub fn integrity(&self) -> &[DanglingReference] {
        &self.dangling
    }

    pub fn query_actors(
        &self,
        filters: &ActorFilters,
        sort: &Sort<ActorSortField>,
        pagination: Pagination,
    ) -> Page<ActorRow> {
        let mut rows: Vec<ActorRow> = filter::filter_actors(&self.store, filters)
            .into_iter()
            .map(|actor| ActorRow {
                actor: actor.clone(),
                stats: stats::actor_stats(&self.store, actor.id),
            })
            .collect();
        sort_rows(&mut rows, sort);
        Page::paginate(rows, pagination)
    }

    pub fn query_productions(
        &self,
        filters: &ProductionFilters,
        sort: &Sort<ProductionSortField>,
        pagination: Pagination,
    ) -> Page<ProductionRow> {
        let mut rows: Vec<ProductionRow> = filter::filter_productions(&self.store, filters)
            .into_iter()
            .map(|p| self.production_row(p, p.studio_id))
            .collect();
        sort_rows(&mut rows, sort);
        Page::paginate(rows, pagination)
    }

    pub fn production_detail(&self, production_id: i64) -> Result<ProductionDetail, NotFoundError> {
        detail::production_detail(&self.store, production_id)
    }

    pub fn actor_stats(&self, actor_id: i64) -> Result<ActorStats, NotFoundError> {
        if self.store.actor(actor_id).is_none() {
            return Err(NotFoundError::new("actor", actor_id));
        }
        Ok(stats::actor_stats(&self.store, actor_id))
    }

    /// Stage names containing `query` (case-insensitive), in stored order.
    pub fn search_actor_suggestions(&self, query: &str) -> Vec<ActorSuggestion> {
        let Some(query) = non_blank(Some(query)) else {
            return Vec::new();
        };
        let query = query.to_lowercase();
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for sn in self.store.stage_names() {
            if suggestions.len() >= SUGGESTION_LIMIT {
                break;
            }
            if !sn.stage_name.to_lowercase().contains(&query) || !seen.insert(sn.id) {
                continue;
            }
            let (Some(actor), Some(studio)) =
                (self.store.actor(sn.actor_id), self.store.studio(sn.studio_id))
            else {
                log::debug!("Skipping suggestion for dangling stage name {}", sn.id);
                continue;
            };
            suggestions.push(ActorSuggestion {
                stage_name: sn.stage_name.clone(),
                stage_name_id: sn.id,
                actor_name: actor.actor_tag.clone(),
                actor_id: actor.id,
                studio_name: studio.name.clone(),
                studio_id: studio.id,
            });
        }
        suggestions
    }

    /// Segments of an album, by code, as browse rows under the album's studio.
    pub fn segments(&self, album_id: i64) -> Result<Vec<ProductionRow>, NotFoundError> {
        let album = self
            .store
            .production(album_id)
            .ok_or(NotFoundError::new("production", album_id))?;
        let mut children: Vec<&Production> = self.store.children_of(album.id).collect();
        children.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(children
            .into_iter()
            .map(|seg| self.production_row(seg, album.studio_id))
            .collect())
    }

    pub fn filter_options(&self) -> FilterOptions {
        options::filter_options(&self.store)
    }

    fn production_row(&self, production: &Production, studio_id: i64) -> ProductionRow {
        let ProductionDetail { actors, tags } = detail::detail_for(&self.store, production);
        ProductionRow {
            production: production.clone(),
            actors,
            tags,
            studio_name: self.store.studio(studio_id).map(|s| s.name.clone()),
        }
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
