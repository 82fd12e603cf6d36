//! Filter engine for actor and production browsing.
//!
//! Every active dimension narrows the set left by the previous one, so a
//! record must pass all of them. Inactive dimensions (empty lists, blank
//! strings) pass everything.

use std::collections::HashSet;

use gvdb_catalog::types::{Actor, Production, ProductionType, TagCategory};
use serde::{Deserialize, Serialize};

use crate::store::Store;
use crate::util::{contains_ignore_case, non_blank};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorFilters {
    pub studios: Vec<i64>,
    pub search: Option<String>,
    /// Include placeholder actors (studio, pooled, unknown).
    pub show_anonymous: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionFilters {
    pub studios: Vec<i64>,
    pub types: Vec<ProductionType>,
    /// Stage name ids.
    pub actors: Vec<i64>,
    #[serde(rename = "dateFrom")]
    pub date_from: Option<String>,
    #[serde(rename = "dateTo")]
    pub date_to: Option<String>,
    pub sex_acts: Vec<String>,
    pub styles: Vec<String>,
    pub body_types: Vec<String>,
    pub sources: Vec<String>,
    pub keyword: Option<String>,
}

impl ProductionFilters {
    fn tag_filters(&self) -> [(TagCategory, &[String]); 4] {
        [
            (TagCategory::SexAct, self.sex_acts.as_slice()),
            (TagCategory::Style, self.styles.as_slice()),
            (TagCategory::BodyType, self.body_types.as_slice()),
            (TagCategory::Source, self.sources.as_slice()),
        ]
    }
}

/// Actors passing the filters, in stored order.
pub fn filter_actors<'a>(store: &'a Store, filters: &ActorFilters) -> Vec<&'a Actor> {
    let mut actors: Vec<&Actor> = store.actors().iter().collect();

    if !filters.show_anonymous {
        actors.retain(|a| !a.is_synthetic());
    }

    if !filters.studios.is_empty() {
        let studios: HashSet<i64> = filters.studios.iter().copied().collect();
        actors.retain(|a| {
            store
                .stage_names_for_actor(a.id)
                .any(|sn| studios.contains(&sn.studio_id))
        });
    }

    if let Some(query) = non_blank(filters.search.as_deref()) {
        actors.retain(|a| {
            a.id.to_string() == query
                || store
                    .stage_names_for_actor(a.id)
                    .any(|sn| contains_ignore_case(&sn.stage_name, query))
        });
    }

    log::debug!("actor filter kept {} of {}", actors.len(), store.actors().len());
    actors
}

/// Productions passing the filters, in stored order.
///
/// Segments are left out unless the type filter asks for them; they are
/// normally reached through their album.
pub fn filter_productions<'a>(
    store: &'a Store,
    filters: &ProductionFilters,
) -> Vec<&'a Production> {
    let wants_segments = filters.types.contains(&ProductionType::Segment);
    let mut productions: Vec<&Production> = store
        .productions()
        .iter()
        .filter(|p| wants_segments || !p.is_segment())
        .collect();

    if !filters.studios.is_empty() {
        let studios: HashSet<i64> = filters.studios.iter().copied().collect();
        productions.retain(|p| studios.contains(&p.studio_id));
    }

    if !filters.types.is_empty() {
        productions.retain(|p| filters.types.contains(&p.production_type));
    }

    if !filters.actors.is_empty() {
        let wanted: HashSet<i64> = filters.actors.iter().copied().collect();
        productions.retain(|p| cast_of(store, p).any(|sn_id| wanted.contains(&sn_id)));
    }

    let date_from = non_blank(filters.date_from.as_deref());
    let date_to = non_blank(filters.date_to.as_deref());
    if date_from.is_some() || date_to.is_some() {
        productions.retain(|p| match p.release_date.as_deref() {
            Some(date) if !date.is_empty() => {
                date_from.is_none_or(|from| date >= from) && date_to.is_none_or(|to| date <= to)
            }
            _ => false,
        });
    }

    for (category, names) in filters.tag_filters() {
        if names.is_empty() {
            continue;
        }
        productions.retain(|p| {
            store
                .tag_links_for(p.id)
                .filter_map(|link| store.tag(link.tag_id))
                .any(|t| t.category == category && names.contains(&t.name))
        });
    }

    if let Some(keyword) = non_blank(filters.keyword.as_deref()) {
        productions.retain(|p| {
            [Some(p.code.as_str()), p.title.as_deref(), p.comment.as_deref()]
                .into_iter()
                .flatten()
                .any(|field| contains_ignore_case(field, keyword))
        });
    }

    log::debug!(
        "production filter kept {} of {}",
        productions.len(),
        store.productions().len()
    );
    productions
}

/// Stage name ids credited on a production. Albums contribute their cast
/// list; segments also pool their parent album's cast and performances.
fn cast_of<'a>(store: &'a Store, production: &'a Production) -> impl Iterator<Item = i64> + 'a {
    let parent = production
        .parent_id
        .filter(|_| production.is_segment())
        .and_then(|id| store.production(id));

    let own = store
        .performances_for_production(production.id)
        .map(|perf| perf.stage_name_id)
        .chain(production.performer_ids().iter().copied());
    let inherited = parent.into_iter().flat_map(move |album| {
        store
            .performances_for_production(album.id)
            .map(|perf| perf.stage_name_id)
            .chain(album.performer_ids().iter().copied())
    });
    own.chain(inherited)
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
