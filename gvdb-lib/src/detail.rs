//! Production detail view: credited cast and bucketed tags.

use std::collections::HashSet;

use gvdb_catalog::types::{PerformerType, Production, Role, StageName, TagCategory};
use serde::Serialize;

use crate::error::NotFoundError;
use crate::store::Store;

/// One credited performer of a production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditedActor {
    pub stage_name: String,
    pub actor_name: String,
    pub studio_name: String,
    /// `None` for album credits, which carry no per-performance role.
    pub role: Option<Role>,
    pub performer_type: Option<PerformerType>,
}

/// Tag names of a production, by browsing category. Scenario tags are not
/// part of the browsing view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagBuckets {
    pub sex_acts: Vec<String>,
    pub styles: Vec<String>,
    pub body_types: Vec<String>,
    pub sources: Vec<String>,
}

impl TagBuckets {
    /// The bucket for a category, or `None` for categories not browsed.
    pub fn bucket(&self, category: TagCategory) -> Option<&[String]> {
        match category {
            TagCategory::SexAct => Some(&self.sex_acts),
            TagCategory::Style => Some(&self.styles),
            TagCategory::BodyType => Some(&self.body_types),
            TagCategory::Source => Some(&self.sources),
            TagCategory::Scenario => None,
        }
    }

    fn bucket_mut(&mut self, category: TagCategory) -> Option<&mut Vec<String>> {
        match category {
            TagCategory::SexAct => Some(&mut self.sex_acts),
            TagCategory::Style => Some(&mut self.styles),
            TagCategory::BodyType => Some(&mut self.body_types),
            TagCategory::Source => Some(&mut self.sources),
            TagCategory::Scenario => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionDetail {
    pub actors: Vec<CreditedActor>,
    pub tags: TagBuckets,
}

/// Build the detail view of a production by id.
pub fn production_detail(
    store: &Store,
    production_id: i64,
) -> Result<ProductionDetail, NotFoundError> {
    let production = store
        .production(production_id)
        .ok_or(NotFoundError::new("production", production_id))?;
    Ok(detail_for(store, production))
}

/// Build the detail view of an already-resolved production.
pub fn detail_for(store: &Store, production: &Production) -> ProductionDetail {
    ProductionDetail {
        actors: credited_actors(store, production),
        tags: production_tags(store, production.id),
    }
}

/// Credited cast, in listed order, without studio placeholder rows.
///
/// Albums use their denormalized cast list (deduplicated by stage name,
/// no role); singles and segments use their performance rows.
pub fn credited_actors(store: &Store, production: &Production) -> Vec<CreditedActor> {
    let mut actors = Vec::new();

    if production.is_album() {
        let mut seen = HashSet::new();
        for &sn_id in production.performer_ids() {
            if !seen.insert(sn_id) {
                continue;
            }
            let Some(sn) = store.stage_name(sn_id) else {
                log::debug!("album {} lists missing stage name {}", production.id, sn_id);
                continue;
            };
            if let Some(credit) = credit(store, sn, None, None) {
                actors.push(credit);
            }
        }
    } else {
        for perf in store.performances_for_production(production.id) {
            let Some(sn) = store.stage_name(perf.stage_name_id) else {
                log::debug!(
                    "performance {} references missing stage name {}",
                    perf.id,
                    perf.stage_name_id
                );
                continue;
            };
            if let Some(credit) = credit(store, sn, perf.role.clone(), Some(perf.performer_type)) {
                actors.push(credit);
            }
        }
    }

    actors
}

fn credit(
    store: &Store,
    sn: &StageName,
    role: Option<Role>,
    performer_type: Option<PerformerType>,
) -> Option<CreditedActor> {
    let actor = store.actor(sn.actor_id)?;
    if actor.is_studio_placeholder() {
        return None;
    }
    let Some(studio) = store.studio(sn.studio_id) else {
        log::debug!("stage name {} references missing studio {}", sn.id, sn.studio_id);
        return None;
    };
    Some(CreditedActor {
        stage_name: sn.stage_name.clone(),
        actor_name: actor.actor_tag.clone(),
        studio_name: studio.name.clone(),
        role,
        performer_type,
    })
}

/// Tag names of a production, bucketed by category in link order.
pub fn production_tags(store: &Store, production_id: i64) -> TagBuckets {
    let mut buckets = TagBuckets::default();
    for link in store.tag_links_for(production_id) {
        let Some(tag) = store.tag(link.tag_id) else {
            log::debug!(
                "production {} links missing tag {}",
                production_id,
                link.tag_id
            );
            continue;
        };
        if let Some(bucket) = buckets.bucket_mut(tag.category) {
            bucket.push(tag.name.clone());
        }
    }
    buckets
}

#[cfg(test)]
#[path = "tests/detail_tests.rs"]
mod tests;
