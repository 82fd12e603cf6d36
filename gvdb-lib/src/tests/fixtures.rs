//! Shared catalog fixtures for unit tests.

use gvdb_catalog::types::*;

use crate::store::Store;

pub fn studio(id: i64, name: &str) -> Studio {
    Studio {
        id,
        name: name.to_string(),
    }
}

pub fn actor(id: i64, tag: &str) -> Actor {
    Actor {
        id,
        actor_tag: tag.to_string(),
        gvdb_id: None,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn stage(id: i64, actor_id: i64, studio_id: i64, name: &str) -> StageName {
    StageName {
        id,
        actor_id,
        studio_id,
        stage_name: name.to_string(),
    }
}

pub fn production(id: i64, code: &str, kind: ProductionType, studio_id: i64) -> Production {
    Production {
        id,
        code: code.to_string(),
        title: None,
        production_type: kind,
        studio_id,
        release_date: None,
        created_at: None,
        updated_at: None,
        parent_id: None,
        performer_ids: None,
        comment: None,
    }
}

pub fn single(id: i64, code: &str, studio_id: i64, date: Option<&str>) -> Production {
    Production {
        release_date: date.map(str::to_string),
        ..production(id, code, ProductionType::Single, studio_id)
    }
}

pub fn album(id: i64, code: &str, studio_id: i64, date: Option<&str>, cast: &[i64]) -> Production {
    Production {
        release_date: date.map(str::to_string),
        performer_ids: Some(cast.to_vec()),
        ..production(id, code, ProductionType::Album, studio_id)
    }
}

pub fn segment(id: i64, code: &str, studio_id: i64, parent: i64, date: Option<&str>) -> Production {
    Production {
        release_date: date.map(str::to_string),
        parent_id: Some(parent),
        ..production(id, code, ProductionType::Segment, studio_id)
    }
}

pub fn perf(id: i64, production_id: i64, stage_name_id: i64, role: Option<Role>) -> Performance {
    Performance {
        id,
        production_id,
        stage_name_id,
        role,
        performer_type: PerformerType::Named,
    }
}

pub fn tag(id: i64, category: TagCategory, name: &str) -> Tag {
    Tag {
        id,
        category,
        name: name.to_string(),
        display_name: None,
    }
}

pub fn link(production_id: i64, tag_id: i64) -> ProductionTag {
    ProductionTag {
        production_id,
        tag_id,
    }
}

/// A small catalog exercising every join path.
///
/// - Anna (10) works at Coat as "Anna" and at Acceler as "Annie".
/// - Ben (11) works at Coat. Carl (14) has no stage names.
/// - STUDIO_COAT (12) and ANONYMOUS_POOL_1 (13) are placeholders.
/// - ACC-100 (1002) is an album with two segments (1003, 1004).
/// - Performance 9 and tag link (1000, 77) dangle.
pub fn sample_snapshot() -> Snapshot {
    let mut winter = single(1001, "COAT-001", 1, Some("2020-01-15"));
    winter.title = Some("Winter".to_string());

    let mut summer = single(1000, "COAT-002", 1, Some("2021-03-01"));
    summer.title = Some("Summer".to_string());
    summer.comment = Some("Shot at the beach".to_string());

    let mut undated = single(1005, "ACC-050", 2, None);
    undated.updated_at = Some("2019-05-05T10:00:00".to_string());

    let mut masked = perf(6, 1003, 104, None);
    masked.performer_type = PerformerType::Masked;
    let mut placeholder = perf(3, 1000, 103, None);
    placeholder.performer_type = PerformerType::Anonymous;

    let mut ben = actor(11, "Ben");
    ben.updated_at = Some("2024-02-02T00:00:00".to_string());

    Snapshot {
        studios: vec![studio(1, "Coat"), studio(2, "Acceler"), studio(3, "Ikuze")],
        actors: vec![
            actor(10, "Anna"),
            ben,
            actor(12, "STUDIO_COAT"),
            actor(13, "ANONYMOUS_POOL_1"),
            actor(14, "Carl"),
        ],
        stage_names: vec![
            stage(100, 10, 1, "Anna"),
            stage(101, 10, 2, "Annie"),
            stage(102, 11, 1, "Ben"),
            stage(103, 12, 1, "Coat Staff"),
            stage(104, 13, 2, "Masked Guy"),
        ],
        productions: vec![
            summer,
            winter,
            album(1002, "ACC-100", 2, Some("2022-06-01"), &[101, 104, 101, 103]),
            segment(1003, "ACC-100-1", 2, 1002, Some("2022-06-01")),
            segment(1004, "ACC-100-2", 2, 1002, None),
            undated,
        ],
        performances: vec![
            perf(1, 1000, 100, Some(Role::Top)),
            perf(2, 1000, 102, Some(Role::Bottom)),
            placeholder,
            perf(4, 1001, 100, Some(Role::Giver)),
            perf(5, 1003, 101, Some(Role::Receiver)),
            masked,
            perf(7, 1004, 101, Some(Role::Top)),
            perf(8, 1005, 101, None),
            perf(9, 1000, 999, Some(Role::Top)),
        ],
        tags: vec![
            tag(1, TagCategory::SexAct, "oral"),
            tag(2, TagCategory::Style, "BDSM"),
            tag(3, TagCategory::BodyType, "muscle"),
            tag(4, TagCategory::Source, "ssd"),
            tag(5, TagCategory::Scenario, "office"),
            tag(6, TagCategory::Style, "校園"),
        ],
        production_tags: vec![
            link(1000, 1),
            link(1000, 2),
            link(1000, 5),
            link(1001, 3),
            link(1002, 4),
            link(1002, 2),
            link(1000, 77),
        ],
    }
}

pub fn sample_store() -> Store {
    Store::new(sample_snapshot())
}

/// `count` singles at studio 1 with codes `P-001`.. in reverse stored order.
pub fn numbered_singles(count: i64) -> Snapshot {
    let productions = (1..=count)
        .rev()
        .map(|n| single(n, &format!("P-{n:03}"), 1, Some("2020-01-01")))
        .collect();
    Snapshot {
        studios: vec![studio(1, "Coat")],
        productions,
        ..Snapshot::default()
    }
}
