//! Metamodel-constrained graph model core.
//!
//! This crate is the single source of truth for model invariants: the
//! element and relationship stores, the shape validation gating every
//! mutation, and the registry of pluggable notation metamodels that decide
//! which element types may connect via which relationship types.
//!
//! Canvas interaction, rendering/layout and persistence are external
//! collaborators; they consume these stores and validation results through
//! plain serializable shapes.

pub mod ident;
pub mod logging;
pub mod metamodel;
pub mod model;
pub mod repo;
pub mod schema;
pub mod service;

pub use ident::{generate_id, ELEMENT_ID_PREFIX, RELATIONSHIP_ID_PREFIX, VIEW_ID_PREFIX};
pub use logging::{default_log_level, init_logging, logging_status};
pub use metamodel::definition::{
    notation_of, Aspect, ConnectionRule, DefinitionError, ElementTypeDefinition, Layer, Metamodel,
    PropertyDefinition, PropertyKind, RelationshipTypeDefinition, SourceArrow, TargetArrow,
    TypeFilter, ValidConnections, ViewpointDefinition,
};
pub use metamodel::registry::MetamodelRegistry;
pub use model::element::Element;
pub use model::property::{PropertyMap, PropertyValue};
pub use model::relationship::{AccessQualifier, Relationship};
pub use model::view::{
    EdgeStyle, GroupStyle, LineStyle, NodeStyle, Point, View, ViewEdge, ViewGroup, ViewNode,
};
pub use repo::element_repo::{CreateElementOptions, ElementRepository, UpdateElementOptions};
pub use repo::relationship_repo::{
    ConnectionReport, ConnectionViolation, CreateRelationshipOptions, RelationshipRepository,
    UpdateRelationshipOptions,
};
pub use repo::{StoreError, StoreResult};
pub use schema::{validate_element, validate_relationship, validate_view, SchemaViolation};
pub use service::model_service::{ElementRemoval, ModelExport, ModelService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
