//! Element store.
//!
//! # Responsibility
//! - Provide create/get/update/delete and query APIs over the element set.
//! - Assign identifiers and maintain creation/modification timestamps.
//!
//! # Invariants
//! - Every write path validates the candidate before committing; a failed
//!   write leaves prior state untouched.
//! - `id`, `type` and `created` never change after creation.
//! - Returned entities are snapshots, never aliases into storage.

use crate::model::element::Element;
use crate::model::property::PropertyMap;
use crate::repo::{StoreError, StoreResult};
use crate::schema::validate_element;
use log::debug;
use std::collections::BTreeMap;

/// Input for creating a new element.
#[derive(Debug, Clone, Default)]
pub struct CreateElementOptions {
    /// Compound type id, e.g. `archimate:ApplicationComponent`.
    pub type_id: String,
    pub name: String,
    pub documentation: Option<String>,
    pub properties: PropertyMap,
    pub tags: Vec<String>,
}

/// Input for updating an element. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateElementOptions {
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub properties: Option<PropertyMap>,
    pub tags: Option<Vec<String>>,
}

/// In-memory element store.
#[derive(Debug, Default)]
pub struct ElementRepository {
    elements: BTreeMap<String, Element>,
}

impl ElementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element: assigns an `elem-` identifier and timestamps,
    /// validates the shape and inserts only on success.
    pub fn create(&mut self, options: CreateElementOptions) -> StoreResult<Element> {
        let mut element = Element::new(options.type_id, options.name);
        element.documentation = options.documentation;
        element.properties = options.properties;
        element.tags = options.tags;

        let violations = validate_element(&element);
        if !violations.is_empty() {
            return Err(StoreError::Schema(violations));
        }

        debug!(
            "event=element_created module=repo id={} type={}",
            element.id, element.type_id
        );
        self.elements.insert(element.id.clone(), element.clone());
        Ok(element)
    }

    /// Returns a snapshot of one element.
    pub fn get(&self, id: &str) -> Option<Element> {
        self.elements.get(id).cloned()
    }

    pub fn has(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.elements.len()
    }

    /// Returns snapshots of all elements, ordered by identifier.
    pub fn get_all(&self) -> Vec<Element> {
        self.elements.values().cloned().collect()
    }

    /// Returns elements of one exact compound type.
    pub fn get_by_type(&self, type_id: &str) -> Vec<Element> {
        self.collect(|element| element.type_id == type_id)
    }

    /// Returns elements whose type belongs to one notation (prefix match on
    /// the portion before `:`).
    pub fn get_by_notation(&self, notation: &str) -> Vec<Element> {
        let prefix = format!("{notation}:");
        self.collect(|element| element.type_id.starts_with(&prefix))
    }

    /// Returns elements carrying the given tag.
    pub fn get_by_tag(&self, tag: &str) -> Vec<Element> {
        self.collect(|element| element.tags.iter().any(|t| t == tag))
    }

    /// Case-insensitive substring search over element names.
    pub fn search_by_name(&self, query: &str) -> Vec<Element> {
        let needle = query.to_lowercase();
        self.collect(|element| element.name.to_lowercase().contains(&needle))
    }

    /// Updates one element, merging only the supplied fields and advancing
    /// the modification timestamp.
    ///
    /// Returns `Ok(None)` when the id is absent. On validation failure the
    /// stored state is retained unchanged.
    pub fn update(
        &mut self,
        id: &str,
        options: UpdateElementOptions,
    ) -> StoreResult<Option<Element>> {
        let Some(existing) = self.elements.get(id) else {
            return Ok(None);
        };

        let mut candidate = existing.clone();
        if let Some(name) = options.name {
            candidate.name = name;
        }
        if let Some(documentation) = options.documentation {
            candidate.documentation = Some(documentation);
        }
        if let Some(properties) = options.properties {
            candidate.properties = properties;
        }
        if let Some(tags) = options.tags {
            candidate.tags = tags;
        }
        candidate.touch();

        let violations = validate_element(&candidate);
        if !violations.is_empty() {
            return Err(StoreError::Schema(violations));
        }

        self.elements.insert(id.to_string(), candidate.clone());
        Ok(Some(candidate))
    }

    /// Deletes one element. Returns whether it existed.
    ///
    /// Relationships referencing the deleted element are NOT removed here;
    /// the caller decides when to run the relationship store's
    /// `delete_for_element` cascade.
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.elements.remove(id).is_some();
        if removed {
            debug!("event=element_deleted module=repo id={id}");
        }
        removed
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Bulk import. Trusts incoming identifiers and timestamps but still
    /// validates each item, aborting at the first invalid one.
    ///
    /// Items loaded before the failing index stay committed; callers wanting
    /// all-or-nothing semantics must load into a fresh store and swap.
    pub fn load_from_array(&mut self, elements: Vec<Element>) -> StoreResult<usize> {
        let mut loaded = 0;
        for (index, element) in elements.into_iter().enumerate() {
            let violations = validate_element(&element);
            if !violations.is_empty() {
                return Err(StoreError::BatchItem { index, violations });
            }
            self.elements.insert(element.id.clone(), element);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Exports snapshots of all elements, ordered by identifier.
    pub fn to_array(&self) -> Vec<Element> {
        self.get_all()
    }

    fn collect<F>(&self, keep: F) -> Vec<Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.elements
            .values()
            .filter(|element| keep(element))
            .cloned()
            .collect()
    }
}
