use std::sync::Arc;

use strata_core::{
    CreateElementOptions, CreateRelationshipOptions, Metamodel, ModelService, StoreError,
    UpdateElementOptions,
};

const NANO_METAMODEL: &str = r##"{
    "id": "n",
    "name": "Nano",
    "version": "1.0.0",
    "layers": [
        { "id": "core", "name": "Core", "color": "#B5FFFF" }
    ],
    "elementTypes": [
        {
            "id": "n:Widget",
            "name": "Widget",
            "layer": "core",
            "aspect": "active",
            "shape": "rectangle",
            "documentation": "A widget.",
            "properties": []
        }
    ],
    "relationshipTypes": [
        {
            "id": "n:Links",
            "name": "Links",
            "lineStyle": "solid",
            "sourceArrow": "none",
            "targetArrow": "open",
            "documentation": "Widget to widget.",
            "validConnections": [
                { "source": "n:Widget", "target": "n:Widget" }
            ]
        }
    ],
    "viewpoints": []
}"##;

fn widget(name: &str) -> CreateElementOptions {
    CreateElementOptions {
        type_id: "n:Widget".to_string(),
        name: name.to_string(),
        ..CreateElementOptions::default()
    }
}

fn links(source_id: &str, target_id: &str) -> CreateRelationshipOptions {
    CreateRelationshipOptions {
        type_id: "n:Links".to_string(),
        source_id: source_id.to_string(),
        target_id: target_id.to_string(),
        ..CreateRelationshipOptions::default()
    }
}

#[test]
fn service_wires_stores_for_checked_creation() {
    let metamodel =
        Metamodel::from_json_str(NANO_METAMODEL).expect("fixture metamodel should parse");
    let mut service = ModelService::with_metamodel(Arc::new(metamodel));

    let e1 = service.create_element(widget("one")).expect("create should succeed");
    let e2 = service.create_element(widget("two")).expect("create should succeed");

    service
        .create_relationship(links(&e1.id, &e2.id))
        .expect("legal connection should be created");

    let err = service
        .create_relationship(links(&e1.id, "missing"))
        .expect_err("missing target should be rejected");
    assert!(matches!(err, StoreError::Rejected(_)));
}

#[test]
fn deleting_an_element_cascades_to_its_relationships() {
    let mut service = ModelService::new();
    let hub = service.create_element(widget("hub")).expect("create should succeed");
    let a = service.create_element(widget("a")).expect("create should succeed");
    let b = service.create_element(widget("b")).expect("create should succeed");

    service
        .create_relationship(links(&hub.id, &a.id))
        .expect("create should succeed");
    service
        .create_relationship(links(&b.id, &hub.id))
        .expect("create should succeed");
    service
        .create_relationship(links(&a.id, &b.id))
        .expect("create should succeed");

    let removal = service.delete_element(&hub.id);
    assert!(removal.removed);
    assert_eq!(removal.relationships_removed, 2);
    assert!(service.element(&hub.id).is_none());
    assert_eq!(service.relationships().len(), 1);

    let missing = service.delete_element(&hub.id);
    assert!(!missing.removed);
    assert_eq!(missing.relationships_removed, 0);
}

#[test]
fn export_import_reproduces_the_whole_model() {
    let mut service = ModelService::new();
    let e1 = service.create_element(widget("one")).expect("create should succeed");
    let e2 = service.create_element(widget("two")).expect("create should succeed");
    service
        .create_relationship(links(&e1.id, &e2.id))
        .expect("create should succeed");
    service
        .update_element(
            &e1.id,
            UpdateElementOptions {
                documentation: Some("updated before export".to_string()),
                ..UpdateElementOptions::default()
            },
        )
        .expect("update should succeed");

    let snapshot = service.export();
    let json = serde_json::to_string(&snapshot).expect("snapshot should serialize");

    let mut restored = ModelService::new();
    restored
        .import(serde_json::from_str(&json).expect("snapshot should parse"))
        .expect("snapshot should import");

    assert_eq!(restored.export(), snapshot);
    assert_eq!(restored.elements().len(), 2);
    assert_eq!(restored.relationships().len(), 1);
}
