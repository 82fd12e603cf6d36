use gvdb_catalog::types::*;
use gvdb_db::*;

fn test_snapshot() -> Snapshot {
    Snapshot {
        studios: vec![Studio {
            id: 1,
            name: "Coat".to_string(),
        }],
        actors: vec![Actor {
            id: 10,
            actor_tag: "Anna".to_string(),
            gvdb_id: Some("77".to_string()),
            notes: None,
            created_at: None,
            updated_at: Some("2024-01-01T00:00:00".to_string()),
        }],
        stage_names: vec![StageName {
            id: 100,
            actor_id: 10,
            studio_id: 1,
            stage_name: "Anna K".to_string(),
        }],
        productions: vec![
            Production {
                id: 1000,
                code: "COAT-ALB".to_string(),
                title: Some("Album".to_string()),
                production_type: ProductionType::Album,
                studio_id: 1,
                release_date: Some("2020-05-01".to_string()),
                created_at: None,
                updated_at: None,
                parent_id: None,
                performer_ids: Some(vec![100, 100]),
                comment: None,
            },
            Production {
                id: 1001,
                code: "COAT-ALB-1".to_string(),
                title: None,
                production_type: ProductionType::Segment,
                studio_id: 1,
                release_date: None,
                created_at: None,
                updated_at: None,
                parent_id: Some(1000),
                performer_ids: None,
                comment: Some("first part".to_string()),
            },
        ],
        performances: vec![Performance {
            id: 1,
            production_id: 1001,
            stage_name_id: 100,
            role: Some(Role::Bottom),
            performer_type: PerformerType::Masked,
        }],
        tags: vec![Tag {
            id: 5,
            category: TagCategory::Scenario,
            name: "office".to_string(),
            display_name: Some("Office".to_string()),
        }],
        production_tags: vec![
            ProductionTag {
                production_id: 1001,
                tag_id: 5,
            },
            ProductionTag {
                production_id: 1001,
                tag_id: 5,
            },
        ],
    }
}

#[test]
fn import_counts_rows() {
    let conn = open_memory().unwrap();
    let stats = import_snapshot(&conn, &test_snapshot()).unwrap();
    assert_eq!(stats.productions, 2);
    assert_eq!(stats.total(), 9);

    assert_eq!(count_rows(&conn, "studios").unwrap(), 1);
    assert_eq!(count_rows(&conn, "performances").unwrap(), 1);
    // Repeated links are kept, as the JSON snapshot keeps them
    assert_eq!(count_rows(&conn, "production_tags").unwrap(), 2);
}

#[test]
fn import_is_repeatable() {
    let conn = open_memory().unwrap();
    import_snapshot(&conn, &test_snapshot()).unwrap();
    import_snapshot(&conn, &test_snapshot()).unwrap();
    assert_eq!(count_rows(&conn, "productions").unwrap(), 2);
}

#[test]
fn failed_import_rolls_back() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_tags BEFORE INSERT ON tags
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    assert!(import_snapshot(&conn, &test_snapshot()).is_err());
    assert_eq!(count_rows(&conn, "studios").unwrap(), 0);
}

#[test]
fn duplicate_names_and_ids_are_imported() {
    let conn = open_memory().unwrap();
    let mut snapshot = test_snapshot();
    snapshot.studios.push(Studio {
        id: 2,
        name: "Coat".to_string(),
    });
    let mut twin = snapshot.actors[0].clone();
    twin.actor_tag = "Anna (second)".to_string();
    snapshot.actors.push(twin);
    snapshot.tags.push(snapshot.tags[0].clone());

    import_snapshot(&conn, &snapshot).unwrap();
    let loaded = load_snapshot(&conn).unwrap();
    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.actors[1].actor_tag, "Anna (second)");
}

#[test]
fn clear_removes_everything() {
    let conn = open_memory().unwrap();
    import_snapshot(&conn, &test_snapshot()).unwrap();
    clear_snapshot(&conn).unwrap();
    for table in gvdb_catalog::TABLES {
        assert_eq!(count_rows(&conn, table).unwrap(), 0, "{table}");
    }
}

#[test]
fn count_rows_rejects_unknown_table() {
    let conn = open_memory().unwrap();
    assert!(matches!(
        count_rows(&conn, "schema_version; DROP TABLE actors"),
        Err(OperationError::NotFound { .. })
    ));
}

#[test]
fn snapshot_survives_database_round_trip() {
    let conn = open_memory().unwrap();
    let snapshot = test_snapshot();
    import_snapshot(&conn, &snapshot).unwrap();
    assert_eq!(load_snapshot(&conn).unwrap(), snapshot);
}

#[test]
fn unrecognized_role_survives_database_round_trip() {
    let conn = open_memory().unwrap();
    let mut snapshot = test_snapshot();
    snapshot.performances[0].role = Some(Role::from("versatile".to_string()));
    import_snapshot(&conn, &snapshot).unwrap();

    let loaded = load_snapshot(&conn).unwrap();
    assert_eq!(loaded.performances[0].role.as_ref().map(Role::as_str), Some("versatile"));
}
