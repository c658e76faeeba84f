//! Structural shape validation for model entities.
//!
//! # Responsibility
//! - Enforce field-level constraints on elements, relationships and views
//!   before a store commits a mutation.
//! - Report every violation found, never just the first.
//!
//! # Invariants
//! - Validators are pure: no entity is mutated while being checked.
//! - Rules already guaranteed by the type system (scalar property union,
//!   access-qualifier enum, timestamp parsing) are enforced at the serde
//!   boundary and not re-checked here.

use crate::model::element::Element;
use crate::model::relationship::Relationship;
use crate::model::view::View;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Compound type ids look like `notation:TypeName`, lowercase notation,
/// capitalized type name.
static TYPE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+:[A-Z][a-zA-Z]+$").expect("valid type id regex"));

/// One field-level shape violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Path of the offending field, e.g. `name` or `nodes[2].width`.
    pub field: String,
    /// Human-readable reason.
    pub reason: String,
}

impl SchemaViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl Display for SchemaViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`: {}", self.field, self.reason)
    }
}

/// Returns whether a string is a well-formed compound type id.
pub fn is_compound_type_id(value: &str) -> bool {
    TYPE_ID_RE.is_match(value)
}

/// Validates an element shape. Returns all violations found.
pub fn validate_element(element: &Element) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    check_non_empty(&mut violations, "id", &element.id);
    check_type_format(&mut violations, "type", &element.type_id);
    check_non_empty(&mut violations, "name", &element.name);
    if element.modified < element.created {
        violations.push(SchemaViolation::new(
            "modified",
            "must not be earlier than `created`",
        ));
    }
    violations
}

/// Validates a relationship shape. Returns all violations found.
pub fn validate_relationship(relationship: &Relationship) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    check_non_empty(&mut violations, "id", &relationship.id);
    check_type_format(&mut violations, "type", &relationship.type_id);
    check_non_empty(&mut violations, "sourceId", &relationship.source_id);
    check_non_empty(&mut violations, "targetId", &relationship.target_id);
    violations
}

/// Validates a view shape. Returns all violations found.
pub fn validate_view(view: &View) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    check_non_empty(&mut violations, "id", &view.id);
    check_non_empty(&mut violations, "name", &view.name);
    if view.modified < view.created {
        violations.push(SchemaViolation::new(
            "modified",
            "must not be earlier than `created`",
        ));
    }

    for (index, node) in view.nodes.iter().enumerate() {
        check_non_empty(&mut violations, format!("nodes[{index}].id"), &node.id);
        check_non_empty(
            &mut violations,
            format!("nodes[{index}].elementId"),
            &node.element_id,
        );
        check_positive(&mut violations, format!("nodes[{index}].width"), node.width);
        check_positive(
            &mut violations,
            format!("nodes[{index}].height"),
            node.height,
        );
    }

    for (index, edge) in view.edges.iter().enumerate() {
        check_non_empty(&mut violations, format!("edges[{index}].id"), &edge.id);
        check_non_empty(
            &mut violations,
            format!("edges[{index}].relationshipId"),
            &edge.relationship_id,
        );
        check_non_empty(
            &mut violations,
            format!("edges[{index}].sourceNodeId"),
            &edge.source_node_id,
        );
        check_non_empty(
            &mut violations,
            format!("edges[{index}].targetNodeId"),
            &edge.target_node_id,
        );
    }

    for (index, group) in view.groups.iter().enumerate() {
        check_non_empty(&mut violations, format!("groups[{index}].id"), &group.id);
        check_positive(
            &mut violations,
            format!("groups[{index}].width"),
            group.width,
        );
        check_positive(
            &mut violations,
            format!("groups[{index}].height"),
            group.height,
        );
    }

    violations
}

fn check_non_empty(violations: &mut Vec<SchemaViolation>, field: impl Into<String>, value: &str) {
    if value.trim().is_empty() {
        violations.push(SchemaViolation::new(field, "must not be empty"));
    }
}

fn check_type_format(violations: &mut Vec<SchemaViolation>, field: &str, value: &str) {
    if !is_compound_type_id(value) {
        violations.push(SchemaViolation::new(
            field,
            format!("`{value}` is not in `notation:TypeName` format"),
        ));
    }
}

fn check_positive(violations: &mut Vec<SchemaViolation>, field: impl Into<String>, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        violations.push(SchemaViolation::new(field, "must be positive"));
    }
}
