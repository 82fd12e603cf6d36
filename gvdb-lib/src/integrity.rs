//! Referential integrity check over a loaded store.
//!
//! Dangling references are tolerated by every view (the referencing record
//! is skipped in that join), but they are collected once at load so they
//! can be logged and reported.

use std::fmt;

use gvdb_catalog::types::ProductionType;
use serde::Serialize;

use crate::store::Store;

/// A foreign key that does not resolve, or resolves to the wrong kind of
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// Collection of the referencing record.
    pub entity: &'static str,
    /// Id of the referencing record (the production id for tag links).
    pub id: i64,
    pub field: &'static str,
    /// The unresolved or mistyped target id.
    pub target: i64,
    pub problem: ReferenceProblem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceProblem {
    Missing,
    WrongType,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problem = match self.problem {
            ReferenceProblem::Missing => "does not exist",
            ReferenceProblem::WrongType => "has the wrong production type",
        };
        write!(
            f,
            "{} {}: {} -> {} {}",
            self.entity, self.id, self.field, self.target, problem
        )
    }
}

/// Check every foreign key in the store.
pub fn check(store: &Store) -> Vec<DanglingReference> {
    let mut found = Vec::new();
    let mut report = |entity, id, field, target, problem| {
        found.push(DanglingReference {
            entity,
            id,
            field,
            target,
            problem,
        })
    };

    for sn in store.stage_names() {
        if store.actor(sn.actor_id).is_none() {
            report("stage_names", sn.id, "actor_id", sn.actor_id, ReferenceProblem::Missing);
        }
        if store.studio(sn.studio_id).is_none() {
            report("stage_names", sn.id, "studio_id", sn.studio_id, ReferenceProblem::Missing);
        }
    }

    for prod in store.productions() {
        if store.studio(prod.studio_id).is_none() {
            report("productions", prod.id, "studio_id", prod.studio_id, ReferenceProblem::Missing);
        }
        if prod.is_segment() {
            if let Some(parent_id) = prod.parent_id {
                match store.production(parent_id) {
                    None => report(
                        "productions",
                        prod.id,
                        "parent_id",
                        parent_id,
                        ReferenceProblem::Missing,
                    ),
                    Some(parent) if !parent.is_album() => report(
                        "productions",
                        prod.id,
                        "parent_id",
                        parent_id,
                        ReferenceProblem::WrongType,
                    ),
                    Some(_) => {}
                }
            }
        }
        for &sn_id in prod.performer_ids() {
            if store.stage_name(sn_id).is_none() {
                report("productions", prod.id, "performer_ids", sn_id, ReferenceProblem::Missing);
            }
        }
    }

    for perf in store.performances() {
        if store.stage_name(perf.stage_name_id).is_none() {
            report(
                "performances",
                perf.id,
                "stage_name_id",
                perf.stage_name_id,
                ReferenceProblem::Missing,
            );
        }
        match store.production(perf.production_id) {
            None => report(
                "performances",
                perf.id,
                "production_id",
                perf.production_id,
                ReferenceProblem::Missing,
            ),
            Some(prod) if prod.production_type == ProductionType::Album => report(
                "performances",
                perf.id,
                "production_id",
                perf.production_id,
                ReferenceProblem::WrongType,
            ),
            Some(_) => {}
        }
    }

    for link in store.production_tags() {
        if store.production(link.production_id).is_none() {
            report(
                "production_tags",
                link.production_id,
                "production_id",
                link.production_id,
                ReferenceProblem::Missing,
            );
        }
        if store.tag(link.tag_id).is_none() {
            report(
                "production_tags",
                link.production_id,
                "tag_id",
                link.tag_id,
                ReferenceProblem::Missing,
            );
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_store;

    #[test]
    fn sample_reports_known_dangling_references() {
        let store = sample_store();
        let found = check(&store);
        assert!(found.iter().any(|d| d.entity == "performances"
            && d.field == "stage_name_id"
            && d.target == 999));
        assert!(found.iter().any(|d| d.entity == "production_tags" && d.target == 77));
        assert_eq!(found.len(), 2, "unexpected: {found:?}");
    }

    #[test]
    fn segment_under_non_album_is_wrong_type() {
        let mut snapshot = crate::test_fixtures::sample_snapshot();
        // Re-parent a segment under a single
        if let Some(seg) = snapshot.productions.iter_mut().find(|p| p.id == 1004) {
            seg.parent_id = Some(1000);
        }
        let store = Store::new(snapshot);
        let found = check(&store);
        assert!(found.iter().any(|d| d.id == 1004
            && d.field == "parent_id"
            && d.problem == ReferenceProblem::WrongType));
    }

    #[test]
    fn display_is_readable() {
        let d = DanglingReference {
            entity: "performances",
            id: 9,
            field: "stage_name_id",
            target: 999,
            problem: ReferenceProblem::Missing,
        };
        assert_eq!(d.to_string(), "performances 9: stage_name_id -> 999 does not exist");
    }
}
