//! Relationship store with referential and metamodel checking.
//!
//! # Responsibility
//! - Provide create/get/update/delete and query APIs over the relationship
//!   set.
//! - Check, before creation, that endpoints exist in the wired element store
//!   and that the connection is legal under the wired metamodel.
//!
//! # Invariants
//! - All applicable check violations are accumulated and reported together;
//!   there is no early exit.
//! - A relationship's type and endpoints are immutable after creation.
//! - A rule-string legality declaration skips structural checking entirely
//!   (deliberate escape hatch, not a silent pass of the table check).

use crate::metamodel::definition::Metamodel;
use crate::model::property::PropertyMap;
use crate::model::relationship::{AccessQualifier, Relationship};
use crate::repo::element_repo::ElementRepository;
use crate::repo::{StoreError, StoreResult};
use crate::schema::validate_relationship;
use log::debug;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

/// One referential/metamodel check failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionViolation {
    /// Source element id absent from the wired element store.
    MissingSource(String),
    /// Target element id absent from the wired element store.
    MissingTarget(String),
    /// Relationship type id not declared by the wired metamodel.
    UnknownType(String),
    /// The (source type, target type) pair is absent from the declared
    /// connection table.
    IllegalConnection {
        source_type: String,
        relationship_type: String,
        target_type: String,
    },
}

impl Display for ConnectionViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSource(id) => write!(f, "source element '{id}' not found"),
            Self::MissingTarget(id) => write!(f, "target element '{id}' not found"),
            Self::UnknownType(type_id) => write!(f, "unknown relationship type: {type_id}"),
            Self::IllegalConnection {
                source_type,
                relationship_type,
                target_type,
            } => write!(
                f,
                "invalid connection: {source_type} cannot have {relationship_type} relationship to {target_type}"
            ),
        }
    }
}

/// Outcome of checking one candidate relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub valid: bool,
    pub errors: Vec<ConnectionViolation>,
}

/// Input for creating a new relationship.
#[derive(Debug, Clone, Default)]
pub struct CreateRelationshipOptions {
    /// Compound type id, e.g. `archimate:Serving`.
    pub type_id: String,
    pub source_id: String,
    pub target_id: String,
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub properties: PropertyMap,
    pub access: Option<AccessQualifier>,
    pub influence_strength: Option<String>,
}

/// Input for updating a relationship. Type and endpoints are not updatable.
///
/// Qualifier updates do not re-check that the relationship's type is
/// access- or influence-flavored; callers may set either field on any
/// relationship.
#[derive(Debug, Clone, Default)]
pub struct UpdateRelationshipOptions {
    pub name: Option<String>,
    pub documentation: Option<String>,
    pub properties: Option<PropertyMap>,
    pub access: Option<AccessQualifier>,
    pub influence_strength: Option<String>,
}

/// In-memory relationship store, optionally wired to an element store for
/// referential checks and to one active metamodel for structural checks.
#[derive(Debug, Default)]
pub struct RelationshipRepository {
    relationships: BTreeMap<String, Relationship>,
    elements: Option<Rc<RefCell<ElementRepository>>>,
    metamodel: Option<Arc<Metamodel>>,
}

impl RelationshipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires the element store consulted for endpoint existence.
    pub fn set_element_store(&mut self, elements: Rc<RefCell<ElementRepository>>) {
        self.elements = Some(elements);
    }

    /// Wires the active metamodel consulted for type/connection legality.
    pub fn set_metamodel(&mut self, metamodel: Arc<Metamodel>) {
        self.metamodel = Some(metamodel);
    }

    /// Removes the active metamodel; structural checking becomes opt-out.
    pub fn clear_metamodel(&mut self) {
        self.metamodel = None;
    }

    /// Checks one candidate against the wired element store and metamodel.
    ///
    /// Runs every applicable check and accumulates all violations. The
    /// connection-table check needs both endpoint types, so it is skipped
    /// when either endpoint was not found; the unknown-type check runs
    /// whenever a metamodel is wired.
    pub fn validate(&self, options: &CreateRelationshipOptions) -> ConnectionReport {
        let mut errors = Vec::new();
        let mut source_type = None;
        let mut target_type = None;

        if let Some(elements) = &self.elements {
            let elements = elements.borrow();
            match elements.get(&options.source_id) {
                Some(element) => source_type = Some(element.type_id),
                None => errors.push(ConnectionViolation::MissingSource(
                    options.source_id.clone(),
                )),
            }
            match elements.get(&options.target_id) {
                Some(element) => target_type = Some(element.type_id),
                None => errors.push(ConnectionViolation::MissingTarget(
                    options.target_id.clone(),
                )),
            }
        }

        if let Some(metamodel) = &self.metamodel {
            match metamodel.find_relationship_type(&options.type_id) {
                None => errors.push(ConnectionViolation::UnknownType(options.type_id.clone())),
                Some(definition) => {
                    if let (Some(source_type), Some(target_type)) = (&source_type, &target_type) {
                        // `permits` answers None for rule-string declarations;
                        // no structural verdict is possible there.
                        if definition.valid_connections.permits(source_type, target_type)
                            == Some(false)
                        {
                            errors.push(ConnectionViolation::IllegalConnection {
                                source_type: source_type.clone(),
                                relationship_type: options.type_id.clone(),
                                target_type: target_type.clone(),
                            });
                        }
                    }
                }
            }
        }

        ConnectionReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Creates a relationship after referential/metamodel checking and shape
    /// validation. A failing check aborts with every violation in the error.
    pub fn create(&mut self, options: CreateRelationshipOptions) -> StoreResult<Relationship> {
        let report = self.validate(&options);
        if !report.valid {
            return Err(StoreError::Rejected(report.errors));
        }
        self.insert_new(options)
    }

    /// Creates a relationship without referential/metamodel checking.
    ///
    /// For trusted bulk import of known-good data only; shape validation
    /// still applies.
    pub fn create_unchecked(
        &mut self,
        options: CreateRelationshipOptions,
    ) -> StoreResult<Relationship> {
        self.insert_new(options)
    }

    /// Returns a snapshot of one relationship.
    pub fn get(&self, id: &str) -> Option<Relationship> {
        self.relationships.get(id).cloned()
    }

    pub fn has(&self, id: &str) -> bool {
        self.relationships.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.relationships.len()
    }

    /// Returns snapshots of all relationships, ordered by identifier.
    pub fn get_all(&self) -> Vec<Relationship> {
        self.relationships.values().cloned().collect()
    }

    /// Returns relationships of one exact compound type.
    pub fn get_by_type(&self, type_id: &str) -> Vec<Relationship> {
        self.collect(|relationship| relationship.type_id == type_id)
    }

    /// Returns relationships whose source is the given element.
    pub fn get_from_element(&self, element_id: &str) -> Vec<Relationship> {
        self.collect(|relationship| relationship.source_id == element_id)
    }

    /// Returns relationships whose target is the given element.
    pub fn get_to_element(&self, element_id: &str) -> Vec<Relationship> {
        self.collect(|relationship| relationship.target_id == element_id)
    }

    /// Returns relationships touching the given element at either end.
    pub fn get_for_element(&self, element_id: &str) -> Vec<Relationship> {
        self.collect(|relationship| relationship.touches(element_id))
    }

    /// Updates one relationship, merging only the supplied fields.
    ///
    /// Returns `Ok(None)` when the id is absent. Type and endpoints cannot
    /// be changed through this path.
    pub fn update(
        &mut self,
        id: &str,
        options: UpdateRelationshipOptions,
    ) -> StoreResult<Option<Relationship>> {
        let Some(existing) = self.relationships.get(id) else {
            return Ok(None);
        };

        let mut candidate = existing.clone();
        if let Some(name) = options.name {
            candidate.name = Some(name);
        }
        if let Some(documentation) = options.documentation {
            candidate.documentation = Some(documentation);
        }
        if let Some(properties) = options.properties {
            candidate.properties = properties;
        }
        if let Some(access) = options.access {
            candidate.access = Some(access);
        }
        if let Some(influence_strength) = options.influence_strength {
            candidate.influence_strength = Some(influence_strength);
        }

        let violations = validate_relationship(&candidate);
        if !violations.is_empty() {
            return Err(StoreError::Schema(violations));
        }

        self.relationships.insert(id.to_string(), candidate.clone());
        Ok(Some(candidate))
    }

    /// Deletes one relationship. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> bool {
        self.relationships.remove(id).is_some()
    }

    /// Deletes every relationship touching the given element and returns the
    /// removed count. This is the cascade mechanism invoked by the caller
    /// when an element is deleted; it is never run implicitly.
    pub fn delete_for_element(&mut self, element_id: &str) -> usize {
        let doomed: Vec<String> = self
            .relationships
            .values()
            .filter(|relationship| relationship.touches(element_id))
            .map(|relationship| relationship.id.clone())
            .collect();
        for id in &doomed {
            self.relationships.remove(id);
        }
        if !doomed.is_empty() {
            debug!(
                "event=relationships_cascaded module=repo element={element_id} removed={}",
                doomed.len()
            );
        }
        doomed.len()
    }

    /// Removes all relationships.
    pub fn clear(&mut self) {
        self.relationships.clear();
    }

    /// Bulk import. Trusts incoming identifiers but still validates each
    /// item's shape, aborting at the first invalid one; items loaded before
    /// the failure stay committed.
    pub fn load_from_array(&mut self, relationships: Vec<Relationship>) -> StoreResult<usize> {
        let mut loaded = 0;
        for (index, relationship) in relationships.into_iter().enumerate() {
            let violations = validate_relationship(&relationship);
            if !violations.is_empty() {
                return Err(StoreError::BatchItem { index, violations });
            }
            self.relationships
                .insert(relationship.id.clone(), relationship);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Exports snapshots of all relationships, ordered by identifier.
    pub fn to_array(&self) -> Vec<Relationship> {
        self.get_all()
    }

    fn insert_new(&mut self, options: CreateRelationshipOptions) -> StoreResult<Relationship> {
        let mut relationship =
            Relationship::new(options.type_id, options.source_id, options.target_id);
        relationship.name = options.name;
        relationship.documentation = options.documentation;
        relationship.properties = options.properties;
        relationship.access = options.access;
        relationship.influence_strength = options.influence_strength;

        let violations = validate_relationship(&relationship);
        if !violations.is_empty() {
            return Err(StoreError::Schema(violations));
        }

        debug!(
            "event=relationship_created module=repo id={} type={} source={} target={}",
            relationship.id, relationship.type_id, relationship.source_id, relationship.target_id
        );
        self.relationships
            .insert(relationship.id.clone(), relationship.clone());
        Ok(relationship)
    }

    fn collect<F>(&self, keep: F) -> Vec<Relationship>
    where
        F: Fn(&Relationship) -> bool,
    {
        self.relationships
            .values()
            .filter(|relationship| keep(relationship))
            .cloned()
            .collect()
    }
}
