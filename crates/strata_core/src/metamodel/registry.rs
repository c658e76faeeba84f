//! In-process notation registry and type resolution.
//!
//! # Responsibility
//! - Own the set of registered notation definitions.
//! - Resolve a compound type id to its definition, layer and display color
//!   across all registered notations.
//!
//! # Invariants
//! - Registration is idempotent by notation id: re-registering replaces the
//!   prior definition.
//! - Resolution of unregistered types returns `None`, never an error.

use crate::metamodel::definition::{notation_of, ElementTypeDefinition, Metamodel};
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of notation metamodels, constructed and owned explicitly so
/// tests and collaborators can hold independent instances.
#[derive(Debug, Default)]
pub struct MetamodelRegistry {
    metamodels: BTreeMap<String, Arc<Metamodel>>,
}

impl MetamodelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one notation definition, replacing any prior definition
    /// with the same id.
    pub fn register(&mut self, metamodel: Metamodel) -> Arc<Metamodel> {
        let id = metamodel.id.clone();
        let shared = Arc::new(metamodel);
        let replaced = self.metamodels.insert(id.clone(), Arc::clone(&shared));
        debug!(
            "event=metamodel_registered module=metamodel notation={id} replaced={}",
            replaced.is_some()
        );
        shared
    }

    /// Returns one registered metamodel by notation id.
    pub fn get(&self, id: &str) -> Option<Arc<Metamodel>> {
        self.metamodels.get(id).cloned()
    }

    /// Returns whether a notation id is registered.
    pub fn has(&self, id: &str) -> bool {
        self.metamodels.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.metamodels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metamodels.is_empty()
    }

    /// Returns all registered metamodels.
    pub fn list(&self) -> Vec<Arc<Metamodel>> {
        self.metamodels.values().cloned().collect()
    }

    /// Returns sorted registered notation ids.
    pub fn ids(&self) -> Vec<String> {
        self.metamodels.keys().cloned().collect()
    }

    /// Finds an element type definition by compound id across all
    /// registered notations.
    ///
    /// Type ids are namespaced by their notation prefix, so at most one
    /// notation should declare any given id in well-formed data.
    pub fn find_element_type(&self, type_id: &str) -> Option<ElementTypeDefinition> {
        self.metamodels
            .values()
            .find_map(|metamodel| metamodel.find_element_type(type_id).cloned())
    }

    /// Resolves the display name of the layer owning a type.
    ///
    /// Returns `None` when the type, its notation or its layer is not
    /// registered.
    pub fn layer_name_for_type(&self, type_id: &str) -> Option<String> {
        self.layer_field_for_type(type_id, |metamodel, layer_id| {
            metamodel.layer(layer_id).map(|layer| layer.name.clone())
        })
    }

    /// Resolves the default display color of the layer owning a type.
    pub fn color_for_type(&self, type_id: &str) -> Option<String> {
        self.layer_field_for_type(type_id, |metamodel, layer_id| {
            metamodel.layer(layer_id).map(|layer| layer.color.clone())
        })
    }

    /// Returns all element types a metamodel declares in one layer.
    pub fn element_types_for_layer(
        &self,
        metamodel_id: &str,
        layer_id: &str,
    ) -> Vec<ElementTypeDefinition> {
        match self.metamodels.get(metamodel_id) {
            Some(metamodel) => metamodel
                .element_types
                .iter()
                .filter(|def| def.layer == layer_id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Removes all registrations. Intended for state reset, not for
    /// production flows.
    pub fn clear(&mut self) {
        self.metamodels.clear();
    }

    fn layer_field_for_type<F>(&self, type_id: &str, project: F) -> Option<String>
    where
        F: Fn(&Metamodel, &str) -> Option<String>,
    {
        let element_type = self.find_element_type(type_id)?;
        let notation_id = notation_of(type_id)?;
        let metamodel = self.metamodels.get(notation_id)?;
        project(metamodel, &element_type.layer)
    }
}
