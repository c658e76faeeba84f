use std::collections::HashSet;

use strata_core::{
    CreateElementOptions, ElementRepository, PropertyValue, StoreError, UpdateElementOptions,
};

fn widget(name: &str) -> CreateElementOptions {
    CreateElementOptions {
        type_id: "nano:Widget".to_string(),
        name: name.to_string(),
        ..CreateElementOptions::default()
    }
}

#[test]
fn create_and_get_roundtrip() {
    let mut repo = ElementRepository::new();

    let created = repo
        .create(widget("Billing engine"))
        .expect("valid element should be created");

    assert!(created.id.starts_with("elem-"));
    assert_eq!(created.created, created.modified);

    let loaded = repo.get(&created.id).expect("element should be retrievable");
    assert_eq!(loaded, created);
    assert!(repo.has(&created.id));
    assert_eq!(repo.count(), 1);
}

#[test]
fn created_ids_are_unique_and_prefixed() {
    let mut repo = ElementRepository::new();
    let mut seen = HashSet::new();
    for index in 0..50 {
        let element = repo
            .create(widget(&format!("widget {index}")))
            .expect("valid element should be created");
        assert!(element.id.starts_with("elem-"));
        assert!(seen.insert(element.id), "ids should never repeat");
    }
    assert_eq!(repo.count(), 50);
}

#[test]
fn create_rejects_invalid_shapes_with_all_violations() {
    let mut repo = ElementRepository::new();

    let err = repo
        .create(CreateElementOptions {
            type_id: "NotAType".to_string(),
            name: String::new(),
            ..CreateElementOptions::default()
        })
        .expect_err("invalid element should be rejected");

    match err {
        StoreError::Schema(violations) => {
            let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
            assert_eq!(fields, vec!["type", "name"]);
        }
        other => panic!("expected schema error, got: {other}"),
    }
    assert_eq!(repo.count(), 0, "failed create must not insert");
}

#[test]
fn update_merges_only_supplied_fields() {
    let mut repo = ElementRepository::new();
    let created = repo
        .create(CreateElementOptions {
            documentation: Some("orders widgets".to_string()),
            tags: vec!["billing".to_string()],
            ..widget("Billing engine")
        })
        .expect("valid element should be created");

    let updated = repo
        .update(
            &created.id,
            UpdateElementOptions {
                name: Some("Billing service".to_string()),
                ..UpdateElementOptions::default()
            },
        )
        .expect("update should succeed")
        .expect("element should exist");

    assert_eq!(updated.name, "Billing service");
    assert_eq!(updated.documentation.as_deref(), Some("orders widgets"));
    assert_eq!(updated.tags, vec!["billing".to_string()]);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.type_id, created.type_id);
    assert_eq!(updated.created, created.created);
    assert!(updated.modified >= created.modified);
}

#[test]
fn update_missing_element_returns_absent_sentinel() {
    let mut repo = ElementRepository::new();
    let result = repo
        .update("elem-missing", UpdateElementOptions::default())
        .expect("absence is not an error");
    assert!(result.is_none());
}

#[test]
fn failed_update_retains_prior_state() {
    let mut repo = ElementRepository::new();
    let created = repo
        .create(widget("Billing engine"))
        .expect("valid element should be created");

    let err = repo
        .update(
            &created.id,
            UpdateElementOptions {
                name: Some(String::new()),
                ..UpdateElementOptions::default()
            },
        )
        .expect_err("empty name should be rejected");
    assert!(matches!(err, StoreError::Schema(_)));

    let current = repo.get(&created.id).expect("element should still exist");
    assert_eq!(current, created, "rejected update must not change anything");
}

#[test]
fn delete_then_get_is_absent_and_count_drops_by_one() {
    let mut repo = ElementRepository::new();
    let kept = repo.create(widget("kept")).expect("create should succeed");
    let doomed = repo.create(widget("doomed")).expect("create should succeed");

    assert_eq!(repo.count(), 2);
    assert!(repo.delete(&doomed.id));
    assert_eq!(repo.count(), 1);
    assert!(repo.get(&doomed.id).is_none());
    assert!(repo.get(&kept.id).is_some());
    assert!(!repo.delete(&doomed.id), "second delete finds nothing");
}

#[test]
fn queries_filter_by_type_notation_tag_and_name() {
    let mut repo = ElementRepository::new();
    repo.create(CreateElementOptions {
        type_id: "nano:Widget".to_string(),
        name: "Billing engine".to_string(),
        tags: vec!["finance".to_string()],
        ..CreateElementOptions::default()
    })
    .expect("create should succeed");
    repo.create(CreateElementOptions {
        type_id: "nano:Gadget".to_string(),
        name: "Billing portal".to_string(),
        ..CreateElementOptions::default()
    })
    .expect("create should succeed");
    repo.create(CreateElementOptions {
        type_id: "macro:Widget".to_string(),
        name: "Archive".to_string(),
        tags: vec!["finance".to_string(), "legacy".to_string()],
        ..CreateElementOptions::default()
    })
    .expect("create should succeed");

    assert_eq!(repo.get_by_type("nano:Widget").len(), 1);
    assert_eq!(repo.get_by_notation("nano").len(), 2);
    assert_eq!(repo.get_by_notation("macro").len(), 1);
    assert_eq!(repo.get_by_tag("finance").len(), 2);
    assert_eq!(repo.get_by_tag("legacy").len(), 1);
    assert_eq!(repo.search_by_name("BILLING").len(), 2);
    assert_eq!(repo.search_by_name("portal").len(), 1);
    assert!(repo.search_by_name("nonexistent").is_empty());
}

#[test]
fn notation_query_does_not_match_bare_prefixes() {
    let mut repo = ElementRepository::new();
    repo.create(CreateElementOptions {
        type_id: "nanomachine:Widget".to_string(),
        name: "Assembler".to_string(),
        ..CreateElementOptions::default()
    })
    .expect("create should succeed");

    assert!(repo.get_by_notation("nano").is_empty());
    assert_eq!(repo.get_by_notation("nanomachine").len(), 1);
}

#[test]
fn returned_snapshots_are_independent_of_store_state() {
    let mut repo = ElementRepository::new();
    let created = repo.create(widget("snapshot")).expect("create should succeed");

    let mut snapshot = repo.get(&created.id).expect("element should exist");
    snapshot.name = "mutated copy".to_string();
    snapshot
        .properties
        .insert("rogue".to_string(), PropertyValue::from(true));

    let stored = repo.get(&created.id).expect("element should exist");
    assert_eq!(stored.name, "snapshot");
    assert!(stored.properties.is_empty());
}

#[test]
fn export_import_roundtrip_is_observationally_equivalent() {
    let mut repo = ElementRepository::new();
    repo.create(CreateElementOptions {
        documentation: Some("first".to_string()),
        tags: vec!["a".to_string()],
        ..widget("one")
    })
    .expect("create should succeed");
    repo.create(widget("two")).expect("create should succeed");

    let exported = repo.to_array();
    let mut restored = ElementRepository::new();
    let loaded = restored
        .load_from_array(exported.clone())
        .expect("exported data should re-import");

    assert_eq!(loaded, 2);
    assert_eq!(restored.to_array(), exported);
    assert_eq!(restored.count(), repo.count());
}

#[test]
fn bulk_import_aborts_at_first_invalid_item_keeping_loaded_prefix() {
    let mut source = ElementRepository::new();
    source.create(widget("one")).expect("create should succeed");
    source.create(widget("two")).expect("create should succeed");

    let mut items = source.to_array();
    items[1].name = String::new();

    let mut target = ElementRepository::new();
    let err = target
        .load_from_array(items)
        .expect_err("invalid item should abort the batch");

    match err {
        StoreError::BatchItem { index, violations } => {
            assert_eq!(index, 1);
            assert_eq!(violations[0].field, "name");
        }
        other => panic!("expected batch item error, got: {other}"),
    }
    // Import is not transactional: the first item stays committed.
    assert_eq!(target.count(), 1);
}
