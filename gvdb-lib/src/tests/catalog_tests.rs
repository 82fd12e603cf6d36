use gvdb_catalog::types::{ProductionType, Snapshot};

use super::*;
use crate::sort::SortOrder;
use crate::test_fixtures::*;

fn catalog() -> Catalog {
    Catalog::from_snapshot(sample_snapshot())
}

fn actor_ids(page: &Page<ActorRow>) -> Vec<i64> {
    page.data.iter().map(|r| r.actor.id).collect()
}

fn production_ids(rows: &[ProductionRow]) -> Vec<i64> {
    rows.iter().map(|r| r.production.id).collect()
}

#[test]
fn integrity_is_checked_at_construction() {
    let catalog = catalog();
    assert_eq!(catalog.integrity().len(), 2);
    assert_eq!(catalog.counts().productions, 6);
}

#[test]
fn actor_browse_defaults() {
    let catalog = catalog();
    let page = catalog.query_actors(
        &ActorFilters::default(),
        &Sort::default(),
        Pagination::default(),
    );
    assert_eq!(actor_ids(&page), vec![10, 11, 14]);
    assert_eq!(page.total, 3);
    assert_eq!(page.page_size, 30);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.data[0].stats.total_productions, 4);
}

#[test]
fn actor_sort_fields() {
    let catalog = catalog();
    let query = |sort| catalog.query_actors(&ActorFilters::default(), &sort, Pagination::default());

    assert_eq!(actor_ids(&query(Sort::asc(ActorSortField::Name))), vec![10, 11, 14]);
    assert_eq!(actor_ids(&query(Sort::desc(ActorSortField::Name))), vec![14, 11, 10]);
    assert_eq!(actor_ids(&query(Sort::asc(ActorSortField::Count))), vec![14, 11, 10]);
    assert_eq!(actor_ids(&query(Sort::desc(ActorSortField::NewestEdit))), vec![11, 10, 14]);
    assert_eq!(actor_ids(&query(Sort::desc(ActorSortField::Unknown))), vec![10, 11, 14]);
}

#[test]
fn actor_names_sort_case_insensitively() {
    let snapshot = Snapshot {
        actors: vec![actor(1, "bob"), actor(2, "Carl"), actor(3, "alice")],
        ..Snapshot::default()
    };
    let catalog = Catalog::from_snapshot(snapshot);
    let page = catalog.query_actors(
        &ActorFilters::default(),
        &Sort::asc(ActorSortField::Name),
        Pagination::default(),
    );
    let names: Vec<&str> = page.data.iter().map(|r| r.actor.actor_tag.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "Carl"]);
}

#[test]
fn exclusion_scopes_differ_between_browse_and_detail() {
    let catalog = catalog();
    let browse = catalog.query_actors(
        &ActorFilters::default(),
        &Sort::default(),
        Pagination::default(),
    );
    assert!(!actor_ids(&browse).contains(&12));
    assert!(!actor_ids(&browse).contains(&13));

    let detail = catalog.production_detail(1002).unwrap();
    let credited: Vec<&str> = detail.actors.iter().map(|a| a.actor_name.as_str()).collect();
    assert!(credited.contains(&"ANONYMOUS_POOL_1"));
    assert!(!credited.contains(&"STUDIO_COAT"));
}

#[test]
fn production_browse_rows_are_enriched() {
    let catalog = catalog();
    let page = catalog.query_productions(
        &ProductionFilters::default(),
        &Sort::default(),
        Pagination::default(),
    );
    assert_eq!(production_ids(&page.data), vec![1000, 1001, 1002, 1005]);
    let summer = &page.data[0];
    assert_eq!(summer.studio_name.as_deref(), Some("Coat"));
    assert_eq!(summer.actors.len(), 2);
    assert_eq!(summer.tags.styles, vec!["BDSM"]);
}

#[test]
fn production_sort_fields() {
    let catalog = catalog();
    let query = |sort| {
        catalog
            .query_productions(&ProductionFilters::default(), &sort, Pagination::default())
            .data
    };
    assert_eq!(
        production_ids(&query(Sort::asc(ProductionSortField::Studio))),
        vec![1002, 1005, 1000, 1001]
    );
    assert_eq!(
        production_ids(&query(Sort::desc(ProductionSortField::Date))),
        vec![1002, 1000, 1001, 1005]
    );
    assert_eq!(
        production_ids(&query(Sort::asc(ProductionSortField::Code))),
        vec![1005, 1002, 1001, 1000]
    );
}

#[test]
fn second_page_of_twenty_five_by_code() {
    let catalog = Catalog::from_snapshot(numbered_singles(25));
    let page = catalog.query_productions(
        &ProductionFilters::default(),
        &Sort::asc(ProductionSortField::Code),
        Pagination::new(2, 10),
    );
    let codes: Vec<String> = page.data.iter().map(|r| r.production.code.clone()).collect();
    let expected: Vec<String> = (11..=20).map(|n| format!("P-{n:03}")).collect();
    assert_eq!(codes, expected);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn page_past_the_end_is_empty() {
    let catalog = Catalog::from_snapshot(numbered_singles(25));
    let page = catalog.query_productions(
        &ProductionFilters::default(),
        &Sort::default(),
        Pagination::new(4, 10),
    );
    assert!(page.data.is_empty());
    assert_eq!(page.total, 25);
}

#[test]
fn equal_codes_keep_input_order() {
    let mut snapshot = numbered_singles(3);
    for p in &mut snapshot.productions {
        p.code = "SAME".to_string();
    }
    let catalog = Catalog::from_snapshot(snapshot);
    for order in [SortOrder::Asc, SortOrder::Desc] {
        let page = catalog.query_productions(
            &ProductionFilters::default(),
            &Sort::new(ProductionSortField::Code, order),
            Pagination::default(),
        );
        assert_eq!(production_ids(&page.data), vec![3, 2, 1]);
    }
}

#[test]
fn studio_filter_excludes_other_studios_regardless_of_type() {
    let catalog = catalog();
    let filters = ProductionFilters {
        studios: vec![1],
        types: vec![ProductionType::Single],
        ..Default::default()
    };
    let page = catalog.query_productions(&filters, &Sort::default(), Pagination::default());
    assert!(page.data.iter().all(|r| r.production.studio_id == 1));
    assert_eq!(page.total, 2);
}

#[test]
fn actor_stats_unknown_actor_is_not_found() {
    let catalog = catalog();
    assert_eq!(catalog.actor_stats(77), Err(NotFoundError::new("actor", 77)));
    assert_eq!(catalog.actor_stats(14).unwrap(), ActorStats::default());
}

#[test]
fn suggestions_match_stage_names() {
    let catalog = catalog();
    let found = catalog.search_actor_suggestions("an");
    let ids: Vec<i64> = found.iter().map(|s| s.stage_name_id).collect();
    assert_eq!(ids, vec![100, 101]);
    assert_eq!(found[1].studio_name, "Acceler");
    assert_eq!(found[1].actor_id, 10);
    assert!(catalog.search_actor_suggestions("  ").is_empty());
}

#[test]
fn suggestions_are_capped() {
    let snapshot = Snapshot {
        studios: vec![studio(1, "Coat")],
        actors: (1..=30).map(|n| actor(n, &format!("Actor {n}"))).collect(),
        stage_names: (1..=30).map(|n| stage(n, n, 1, &format!("Kenji {n}"))).collect(),
        ..Snapshot::default()
    };
    let catalog = Catalog::from_snapshot(snapshot);
    let found = catalog.search_actor_suggestions("kenji");
    assert_eq!(found.len(), SUGGESTION_LIMIT);
    assert_eq!(found[0].stage_name_id, 1);
}

#[test]
fn suggestions_serialize_camel_case() {
    let catalog = catalog();
    let json = serde_json::to_value(catalog.search_actor_suggestions("ben")).unwrap();
    assert_eq!(json[0]["stageNameId"], 102);
    assert_eq!(json[0]["actorName"], "Ben");
    assert_eq!(json[0]["studioId"], 1);
}

#[test]
fn segments_by_code_under_album_studio() {
    let catalog = catalog();
    let segments = catalog.segments(1002).unwrap();
    assert_eq!(production_ids(&segments), vec![1003, 1004]);
    assert!(segments.iter().all(|s| s.studio_name.as_deref() == Some("Acceler")));
    assert!(catalog.segments(1000).unwrap().is_empty());
    assert_eq!(
        catalog.segments(4242).unwrap_err(),
        NotFoundError::new("production", 4242)
    );
}

#[test]
fn browse_rows_flatten_record_fields() {
    let catalog = catalog();
    let actors = catalog.query_actors(
        &ActorFilters::default(),
        &Sort::default(),
        Pagination::new(1, 1),
    );
    let json = serde_json::to_value(&actors).unwrap();
    let row = &json["data"][0];
    assert_eq!(row["actor_tag"], "Anna");
    assert_eq!(row["totalProductions"], 4);
    assert_eq!(row["latestCode"], "ACC-100-1");
    assert_eq!(json["totalPages"], 3);

    let productions = catalog.query_productions(
        &ProductionFilters::default(),
        &Sort::default(),
        Pagination::new(1, 1),
    );
    let json = serde_json::to_value(&productions).unwrap();
    let row = &json["data"][0];
    assert_eq!(row["code"], "COAT-002");
    assert_eq!(row["type"], "single");
    assert_eq!(row["studio_name"], "Coat");
    assert_eq!(row["actors"][1]["stageName"], "Ben");
}
