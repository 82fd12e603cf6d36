//! Per-actor statistics: production totals, role breakdowns, and latest
//! release, globally and per studio.

use std::collections::{BTreeMap, HashSet};

use gvdb_catalog::types::{Production, Role};
use serde::Serialize;

use crate::store::Store;
use crate::timestamp::production_millis;

/// Five-bucket role histogram. Missing or unrecognized roles count as
/// `other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub top: u32,
    pub bottom: u32,
    pub giver: u32,
    pub receiver: u32,
    pub other: u32,
}

impl RoleCounts {
    pub fn tally(&mut self, role: Option<&Role>) {
        match role {
            Some(Role::Top) => self.top += 1,
            Some(Role::Bottom) => self.bottom += 1,
            Some(Role::Giver) => self.giver += 1,
            Some(Role::Receiver) => self.receiver += 1,
            Some(Role::Other(_)) | None => self.other += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.top + self.bottom + self.giver + self.receiver + self.other
    }

    /// Each bucket as a rounded percentage of the total. Buckets are rounded
    /// independently, so they need not sum to 100. An empty histogram yields
    /// all zeros.
    pub fn percentages(&self) -> RoleCounts {
        let total = f64::from(self.total().max(1));
        let pct = |n: u32| (f64::from(n) / total * 100.0).round() as u32;
        RoleCounts {
            top: pct(self.top),
            bottom: pct(self.bottom),
            giver: pct(self.giver),
            receiver: pct(self.receiver),
            other: pct(self.other),
        }
    }
}

/// Tracks the most recent production seen. The first strictly newer
/// production wins; equal timestamps keep the earlier one.
#[derive(Debug, Clone, Default)]
struct Latest {
    millis: i64,
    code: Option<String>,
    date: Option<String>,
}

impl Latest {
    fn observe(&mut self, production: &Production) {
        if let Some(millis) = production_millis(production) {
            if millis > self.millis {
                self.millis = millis;
                self.code = Some(production.code.clone());
                self.date = production.release_date.clone();
            }
        }
    }
}

/// An actor's record at one studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudioDetail {
    pub studio_id: i64,
    pub studio_name: String,
    /// Name credited at this studio.
    pub stage_name: String,
    /// Distinct real productions at this studio.
    pub productions: u32,
    pub role_breakdown: RoleCounts,
    pub role_percentage: RoleCounts,
    pub latest_production_code: Option<String>,
    pub latest_date: Option<String>,
}

/// Aggregate statistics for one actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActorStats {
    #[serde(rename = "totalProductions")]
    pub total_productions: u32,
    #[serde(rename = "roleCounts")]
    pub role_counts: RoleCounts,
    #[serde(rename = "latestCode")]
    pub latest_code: Option<String>,
    #[serde(rename = "latestDate")]
    pub latest_date: Option<String>,
    /// One entry per studio, ordered by studio id.
    pub studio_details: Vec<StudioDetail>,
}

struct StudioAccumulator {
    studio_name: String,
    stage_name: String,
    seen: HashSet<i64>,
    roles: RoleCounts,
    latest: Latest,
}

impl StudioAccumulator {
    fn new(studio_name: &str, stage_name: &str) -> Self {
        Self {
            studio_name: studio_name.to_string(),
            stage_name: stage_name.to_string(),
            seen: HashSet::new(),
            roles: RoleCounts::default(),
            latest: Latest::default(),
        }
    }
}

/// Compute statistics for an actor across all of their stage names.
///
/// Segments of one album count as a single production. Performances whose
/// production does not resolve are skipped; a stage name whose studio does
/// not resolve still counts globally but gets no studio entry.
pub fn actor_stats(store: &Store, actor_id: i64) -> ActorStats {
    let mut seen = HashSet::new();
    let mut roles = RoleCounts::default();
    let mut latest = Latest::default();
    let mut studios: BTreeMap<i64, StudioAccumulator> = BTreeMap::new();

    for sn in store.stage_names_for_actor(actor_id) {
        match store.studio(sn.studio_id) {
            Some(studio) => {
                studios
                    .entry(sn.studio_id)
                    .or_insert_with(|| StudioAccumulator::new(&studio.name, &sn.stage_name));
            }
            None => log::debug!(
                "stage name {} references missing studio {}",
                sn.id,
                sn.studio_id
            ),
        }

        for perf in store.performances_for_stage_name(sn.id) {
            let Some(production) = store.production(perf.production_id) else {
                log::debug!(
                    "performance {} references missing production {}",
                    perf.id,
                    perf.production_id
                );
                continue;
            };

            let key = production.canonical_key();
            seen.insert(key);
            roles.tally(perf.role.as_ref());
            latest.observe(production);

            if let Some(acc) = studios.get_mut(&sn.studio_id) {
                acc.seen.insert(key);
                acc.roles.tally(perf.role.as_ref());
                acc.latest.observe(production);
            }
        }
    }

    let studio_details = studios
        .into_iter()
        .map(|(studio_id, acc)| StudioDetail {
            studio_id,
            studio_name: acc.studio_name,
            stage_name: acc.stage_name,
            productions: acc.seen.len() as u32,
            role_percentage: acc.roles.percentages(),
            role_breakdown: acc.roles,
            latest_production_code: acc.latest.code,
            latest_date: acc.latest.date,
        })
        .collect();

    ActorStats {
        total_productions: seen.len() as u32,
        role_counts: roles,
        latest_code: latest.code,
        latest_date: latest.date,
        studio_details,
    }
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
