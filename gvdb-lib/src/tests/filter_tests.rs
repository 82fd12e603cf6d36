use super::*;
use crate::test_fixtures::*;

fn actor_ids(store: &Store, filters: &ActorFilters) -> Vec<i64> {
    filter_actors(store, filters).iter().map(|a| a.id).collect()
}

fn production_ids(store: &Store, filters: &ProductionFilters) -> Vec<i64> {
    filter_productions(store, filters).iter().map(|p| p.id).collect()
}

#[test]
fn placeholders_hidden_by_default() {
    let store = sample_store();
    assert_eq!(actor_ids(&store, &ActorFilters::default()), vec![10, 11, 14]);
}

#[test]
fn show_anonymous_skips_exclusion() {
    let store = sample_store();
    let filters = ActorFilters {
        show_anonymous: true,
        ..Default::default()
    };
    assert_eq!(actor_ids(&store, &filters), vec![10, 11, 12, 13, 14]);
}

#[test]
fn actor_search_matches_stage_names_case_insensitively() {
    let store = sample_store();
    let filters = ActorFilters {
        search: Some("ann".to_string()),
        ..Default::default()
    };
    assert_eq!(actor_ids(&store, &filters), vec![10]);
}

#[test]
fn actor_search_matches_exact_id() {
    let store = sample_store();
    let filters = ActorFilters {
        search: Some("11".to_string()),
        ..Default::default()
    };
    assert_eq!(actor_ids(&store, &filters), vec![11]);

    // Partial ids do not match
    let filters = ActorFilters {
        search: Some("1".to_string()),
        ..Default::default()
    };
    assert!(actor_ids(&store, &filters).is_empty());
}

#[test]
fn actor_studio_membership() {
    let store = sample_store();
    let filters = ActorFilters {
        studios: vec![2],
        ..Default::default()
    };
    assert_eq!(actor_ids(&store, &filters), vec![10]);
}

#[test]
fn blank_search_is_inactive() {
    let store = sample_store();
    let filters = ActorFilters {
        search: Some("  ".to_string()),
        ..Default::default()
    };
    assert_eq!(actor_ids(&store, &filters), vec![10, 11, 14]);
}

#[test]
fn default_browse_excludes_segments() {
    let store = sample_store();
    assert_eq!(
        production_ids(&store, &ProductionFilters::default()),
        vec![1000, 1001, 1002, 1005]
    );
}

#[test]
fn segment_type_filter_lists_segments() {
    let store = sample_store();
    let filters = ProductionFilters {
        types: vec![ProductionType::Segment],
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1003, 1004]);
}

#[test]
fn studio_and_type_are_anded() {
    let store = sample_store();
    let filters = ProductionFilters {
        studios: vec![1],
        types: vec![ProductionType::Single],
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1000, 1001]);
}

#[test]
fn actor_filter_uses_performances_and_album_cast() {
    let store = sample_store();
    let filters = ProductionFilters {
        actors: vec![101],
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1002, 1005]);
}

#[test]
fn segments_inherit_album_cast() {
    let store = sample_store();
    // Masked Guy (104) performs only in ACC-100-1, but is on the album cast
    let filters = ProductionFilters {
        actors: vec![104],
        types: vec![ProductionType::Segment],
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1003, 1004]);
}

#[test]
fn date_range_excludes_undated() {
    let store = sample_store();
    let filters = ProductionFilters {
        date_from: Some("2021-01-01".to_string()),
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1000, 1002]);

    let filters = ProductionFilters {
        date_to: Some("2021-03-01".to_string()),
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1000, 1001]);
}

#[test]
fn tag_categories_are_independent_and_anded() {
    let store = sample_store();
    let filters = ProductionFilters {
        styles: vec!["BDSM".to_string()],
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1000, 1002]);

    let filters = ProductionFilters {
        styles: vec!["BDSM".to_string()],
        sources: vec!["ssd".to_string()],
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &filters), vec![1002]);
}

#[test]
fn keyword_searches_code_title_and_comment() {
    let store = sample_store();
    let keyword = |k: &str| ProductionFilters {
        keyword: Some(k.to_string()),
        ..Default::default()
    };
    assert_eq!(production_ids(&store, &keyword("beach")), vec![1000]);
    assert_eq!(production_ids(&store, &keyword("acc")), vec![1002, 1005]);
    assert_eq!(production_ids(&store, &keyword("WINTER")), vec![1001]);
}

#[test]
fn filters_deserialize_from_wire_names() {
    let filters: ProductionFilters = serde_json::from_str(
        r#"{"studios": [1], "types": ["single"], "dateFrom": "2020-01-01"}"#,
    )
    .unwrap();
    assert_eq!(filters.types, vec![ProductionType::Single]);
    assert_eq!(filters.date_from.as_deref(), Some("2020-01-01"));
    assert!(filters.keyword.is_none());
}
