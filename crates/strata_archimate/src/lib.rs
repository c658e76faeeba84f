//! Bundled ArchiMate notation definition.
//!
//! Ships the ArchiMate 3.2 metamodel subset as an embedded definition
//! document plus convenience lookups. The document is exactly what a caller
//! would otherwise load from disk and hand to
//! [`strata_core::MetamodelRegistry::register`].

use once_cell::sync::Lazy;
use strata_core::{ElementTypeDefinition, Metamodel, MetamodelRegistry};

/// Notation id used as the prefix of every ArchiMate compound type id.
pub const NOTATION_ID: &str = "archimate";

const METAMODEL_DOCUMENT: &str = include_str!("metamodel.json");

static METAMODEL: Lazy<Metamodel> = Lazy::new(|| {
    Metamodel::from_json_str(METAMODEL_DOCUMENT).expect("bundled metamodel document should lint")
});

/// Returns the bundled ArchiMate metamodel definition.
pub fn metamodel() -> Metamodel {
    METAMODEL.clone()
}

/// Registers the bundled definition into a registry.
pub fn register_into(registry: &mut MetamodelRegistry) {
    registry.register(metamodel());
}

/// Returns whether a compound type id names a bundled ArchiMate element type.
pub fn is_archimate_element_type(type_id: &str) -> bool {
    METAMODEL.find_element_type(type_id).is_some()
}

/// Returns the layer color for an ArchiMate element type.
pub fn layer_color(element_type_id: &str) -> Option<String> {
    let definition = METAMODEL.find_element_type(element_type_id)?;
    METAMODEL
        .layer(&definition.layer)
        .map(|layer| layer.color.clone())
}

/// Returns the element types declared in one layer.
pub fn element_types_in_layer(layer_id: &str) -> Vec<ElementTypeDefinition> {
    METAMODEL
        .element_types
        .iter()
        .filter(|definition| definition.layer == layer_id)
        .cloned()
        .collect()
}
