//! Model use-case service.
//!
//! # Responsibility
//! - Hold one wired element/relationship store pair.
//! - Provide the caller-side cascade for element deletion.
//! - Provide whole-model export/import for persistence collaborators.
//!
//! # Invariants
//! - Element deletion removes touching relationships first, so the
//!   relationship store never outlives its endpoints within this facade.
//! - Export contains no cycles: relationships reference elements by id.

use crate::metamodel::definition::Metamodel;
use crate::model::element::Element;
use crate::model::relationship::Relationship;
use crate::repo::element_repo::{CreateElementOptions, ElementRepository, UpdateElementOptions};
use crate::repo::relationship_repo::{
    CreateRelationshipOptions, RelationshipRepository, UpdateRelationshipOptions,
};
use crate::repo::StoreResult;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Outcome of a cascading element deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRemoval {
    /// Whether the element itself existed and was removed.
    pub removed: bool,
    /// How many relationships touching it were removed alongside.
    pub relationships_removed: usize,
}

/// Serializable whole-model snapshot used for bulk export/import.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelExport {
    pub elements: Vec<Element>,
    pub relationships: Vec<Relationship>,
}

/// Facade over one wired store pair.
pub struct ModelService {
    elements: Rc<RefCell<ElementRepository>>,
    relationships: RelationshipRepository,
}

impl ModelService {
    /// Creates a service with freshly wired stores and no active metamodel:
    /// relationship creation checks endpoints only.
    pub fn new() -> Self {
        let elements = Rc::new(RefCell::new(ElementRepository::new()));
        let mut relationships = RelationshipRepository::new();
        relationships.set_element_store(Rc::clone(&elements));
        Self {
            elements,
            relationships,
        }
    }

    /// Creates a service whose relationship store also checks the given
    /// metamodel's structural rules.
    pub fn with_metamodel(metamodel: Arc<Metamodel>) -> Self {
        let mut service = Self::new();
        service.relationships.set_metamodel(metamodel);
        service
    }

    /// Activates a metamodel on the wired relationship store.
    pub fn set_metamodel(&mut self, metamodel: Arc<Metamodel>) {
        self.relationships.set_metamodel(metamodel);
    }

    pub fn create_element(&mut self, options: CreateElementOptions) -> StoreResult<Element> {
        self.elements.borrow_mut().create(options)
    }

    pub fn update_element(
        &mut self,
        id: &str,
        options: UpdateElementOptions,
    ) -> StoreResult<Option<Element>> {
        self.elements.borrow_mut().update(id, options)
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.elements.borrow().get(id)
    }

    pub fn elements(&self) -> Vec<Element> {
        self.elements.borrow().get_all()
    }

    pub fn create_relationship(
        &mut self,
        options: CreateRelationshipOptions,
    ) -> StoreResult<Relationship> {
        self.relationships.create(options)
    }

    pub fn update_relationship(
        &mut self,
        id: &str,
        options: UpdateRelationshipOptions,
    ) -> StoreResult<Option<Relationship>> {
        self.relationships.update(id, options)
    }

    pub fn relationship(&self, id: &str) -> Option<Relationship> {
        self.relationships.get(id)
    }

    pub fn relationships(&self) -> Vec<Relationship> {
        self.relationships.get_all()
    }

    pub fn delete_relationship(&mut self, id: &str) -> bool {
        self.relationships.delete(id)
    }

    /// Deletes one element together with every relationship touching it.
    ///
    /// The cascade runs before the element removal, so a failure to find the
    /// element still leaves no dangling relationships behind.
    pub fn delete_element(&mut self, id: &str) -> ElementRemoval {
        let relationships_removed = self.relationships.delete_for_element(id);
        let removed = self.elements.borrow_mut().delete(id);
        ElementRemoval {
            removed,
            relationships_removed,
        }
    }

    /// Exports the whole model as a JSON-compatible snapshot.
    pub fn export(&self) -> ModelExport {
        ModelExport {
            elements: self.elements.borrow().to_array(),
            relationships: self.relationships.to_array(),
        }
    }

    /// Imports a snapshot produced by `export`, trusting its identifiers.
    ///
    /// Items loaded before a validation failure stay committed (bulk import
    /// is not transactional).
    pub fn import(&mut self, snapshot: ModelExport) -> StoreResult<()> {
        self.elements
            .borrow_mut()
            .load_from_array(snapshot.elements)?;
        self.relationships
            .load_from_array(snapshot.relationships)?;
        Ok(())
    }

    /// Shared handle to the wired element store, for collaborators that
    /// query elements directly.
    pub fn element_store(&self) -> Rc<RefCell<ElementRepository>> {
        Rc::clone(&self.elements)
    }

    /// The wired relationship store.
    pub fn relationship_store(&self) -> &RelationshipRepository {
        &self.relationships
    }

    /// Mutable access to the wired relationship store.
    pub fn relationship_store_mut(&mut self) -> &mut RelationshipRepository {
        &mut self.relationships
    }
}

impl Default for ModelService {
    fn default() -> Self {
        Self::new()
    }
}
