//! Notation metamodel definitions.
//!
//! # Responsibility
//! - Define the JSON document shape for a notation: layers, element types,
//!   relationship types and viewpoints.
//! - Parse and lint external definition documents before they are handed to
//!   the registry.
//!
//! # Invariants
//! - A metamodel is read-only after registration; nothing in this module
//!   mutates one.
//! - A relationship type's legality is either a finite connection table or an
//!   opaque rule string, never both.

use crate::model::view::LineStyle;
use crate::schema::{is_compound_type_id, SchemaViolation};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returns the notation prefix of a compound type id, if present.
pub fn notation_of(type_id: &str) -> Option<&str> {
    type_id.split_once(':').map(|(prefix, _)| prefix)
}

/// A complete notation definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metamodel {
    /// Notation id, lowercase, used as the prefix of every compound type id.
    pub id: String,
    pub name: String,
    pub version: String,
    /// Ordered layer classification.
    pub layers: Vec<Layer>,
    pub element_types: Vec<ElementTypeDefinition>,
    pub relationship_types: Vec<RelationshipTypeDefinition>,
    pub viewpoints: Vec<ViewpointDefinition>,
}

/// One layer of a notation's classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    /// Default fill color for elements in this layer.
    pub color: String,
}

/// Semantic role of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Active,
    Behavior,
    Passive,
}

/// Declared data type of a type-level property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Number,
    Boolean,
    Enum,
}

/// A property declared on an element or relationship type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default)]
    pub required: bool,
    /// Allowed values for `PropertyKind::Enum`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// Definition of one element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTypeDefinition {
    /// Compound type id, e.g. `archimate:ApplicationComponent`.
    pub id: String,
    pub name: String,
    /// Id of the owning layer.
    pub layer: String,
    pub aspect: Aspect,
    /// Rendering shape key, interpreted by the (external) renderer.
    pub shape: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

/// Arrow decoration at the source end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceArrow {
    None,
    DiamondFilled,
    DiamondHollow,
    CircleFilled,
    CircleHollow,
}

/// Arrow decoration at the target end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetArrow {
    None,
    Open,
    Filled,
    HollowTriangle,
}

/// One legal (source type, target type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRule {
    pub source: String,
    pub target: String,
}

/// Legality declaration for a relationship type.
///
/// The `Rule` variant is a deliberate escape hatch for notations whose
/// legality cannot be expressed as a finite table; structural checking
/// treats it as a no-op (no rule interpreter exists yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidConnections {
    Table(Vec<ConnectionRule>),
    Rule(String),
}

impl ValidConnections {
    /// Returns whether the table permits the given pair. `Rule` declarations
    /// permit nothing and forbid nothing; the caller skips the check.
    pub fn permits(&self, source_type: &str, target_type: &str) -> Option<bool> {
        match self {
            Self::Table(rules) => Some(
                rules
                    .iter()
                    .any(|rule| rule.source == source_type && rule.target == target_type),
            ),
            Self::Rule(_) => None,
        }
    }
}

/// Definition of one relationship type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTypeDefinition {
    /// Compound type id, e.g. `archimate:Serving`.
    pub id: String,
    pub name: String,
    pub line_style: LineStyle,
    pub source_arrow: SourceArrow,
    pub target_arrow: TargetArrow,
    #[serde(default)]
    pub documentation: String,
    pub valid_connections: ValidConnections,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyDefinition>>,
}

/// Allowed-type filter used by viewpoints: everything (`"*"`) or an explicit
/// id list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Listed(Vec<String>),
}

impl TypeFilter {
    /// Returns whether a type id passes this filter.
    pub fn permits(&self, type_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Listed(ids) => ids.iter().any(|id| id == type_id),
        }
    }
}

impl Serialize for TypeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("*"),
            Self::Listed(ids) => ids.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypeFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Token(String),
            Listed(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Token(token) if token == "*" => Ok(Self::All),
            Raw::Token(other) => Err(D::Error::custom(format!(
                "expected `*` or a list of type ids, got `{other}`"
            ))),
            Raw::Listed(ids) => Ok(Self::Listed(ids)),
        }
    }
}

/// Definition of one viewpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewpointDefinition {
    /// Compound viewpoint id, e.g. `archimate:Layered`.
    pub id: String,
    pub name: String,
    pub allowed_elements: TypeFilter,
    pub allowed_relationships: TypeFilter,
    #[serde(default)]
    pub description: String,
}

/// Failure parsing or linting an external definition document.
#[derive(Debug)]
pub enum DefinitionError {
    /// The document is not valid JSON for the metamodel shape.
    Parse(serde_json::Error),
    /// The document parsed but its cross-references do not hold up.
    Invalid(Vec<SchemaViolation>),
}

impl Display for DefinitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "metamodel document is not parseable: {err}"),
            Self::Invalid(violations) => {
                write!(f, "metamodel document is inconsistent: ")?;
                for (index, violation) in violations.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for DefinitionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for DefinitionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl Metamodel {
    /// Parses and lints a JSON definition document.
    ///
    /// The registry itself accepts any already-constructed `Metamodel`
    /// unchecked; this is the quality gate for documents arriving from
    /// outside the process.
    pub fn from_json_str(document: &str) -> Result<Self, DefinitionError> {
        let metamodel: Metamodel = serde_json::from_str(document)?;
        let violations = metamodel.lint();
        if violations.is_empty() {
            Ok(metamodel)
        } else {
            Err(DefinitionError::Invalid(violations))
        }
    }

    /// Serializes this definition back to its JSON document form.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Checks internal consistency of this definition. Returns all problems
    /// found, with document-relative field paths.
    pub fn lint(&self) -> Vec<SchemaViolation> {
        let mut violations = Vec::new();

        if self.id.trim().is_empty() {
            violations.push(SchemaViolation::new("id", "must not be empty"));
        } else if !is_valid_notation_id(&self.id) {
            violations.push(SchemaViolation::new(
                "id",
                format!("`{}` must be lowercase ascii", self.id),
            ));
        }
        if self.name.trim().is_empty() {
            violations.push(SchemaViolation::new("name", "must not be empty"));
        }
        if self.version.trim().is_empty() {
            violations.push(SchemaViolation::new("version", "must not be empty"));
        }

        let mut layer_ids = BTreeSet::new();
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.id.trim().is_empty() {
                violations.push(SchemaViolation::new(
                    format!("layers[{index}].id"),
                    "must not be empty",
                ));
            } else if !layer_ids.insert(layer.id.as_str()) {
                violations.push(SchemaViolation::new(
                    format!("layers[{index}].id"),
                    format!("layer `{}` is declared twice", layer.id),
                ));
            }
        }

        let mut element_type_ids = BTreeSet::new();
        for (index, def) in self.element_types.iter().enumerate() {
            self.check_owned_type_id(
                &mut violations,
                format!("elementTypes[{index}].id"),
                &def.id,
            );
            if !element_type_ids.insert(def.id.as_str()) {
                violations.push(SchemaViolation::new(
                    format!("elementTypes[{index}].id"),
                    format!("type `{}` is declared twice", def.id),
                ));
            }
            if !layer_ids.contains(def.layer.as_str()) {
                violations.push(SchemaViolation::new(
                    format!("elementTypes[{index}].layer"),
                    format!("layer `{}` is not declared", def.layer),
                ));
            }
        }

        let mut relationship_type_ids = BTreeSet::new();
        for (index, def) in self.relationship_types.iter().enumerate() {
            self.check_owned_type_id(
                &mut violations,
                format!("relationshipTypes[{index}].id"),
                &def.id,
            );
            if !relationship_type_ids.insert(def.id.as_str()) {
                violations.push(SchemaViolation::new(
                    format!("relationshipTypes[{index}].id"),
                    format!("type `{}` is declared twice", def.id),
                ));
            }
            if let ValidConnections::Table(rules) = &def.valid_connections {
                for (rule_index, rule) in rules.iter().enumerate() {
                    for (end, type_id) in [("source", &rule.source), ("target", &rule.target)] {
                        if !element_type_ids.contains(type_id.as_str()) {
                            violations.push(SchemaViolation::new(
                                format!(
                                    "relationshipTypes[{index}].validConnections[{rule_index}].{end}"
                                ),
                                format!("element type `{type_id}` is not declared"),
                            ));
                        }
                    }
                }
            }
        }

        for (index, viewpoint) in self.viewpoints.iter().enumerate() {
            if let TypeFilter::Listed(ids) = &viewpoint.allowed_elements {
                for type_id in ids {
                    if !element_type_ids.contains(type_id.as_str()) {
                        violations.push(SchemaViolation::new(
                            format!("viewpoints[{index}].allowedElements"),
                            format!("element type `{type_id}` is not declared"),
                        ));
                    }
                }
            }
            if let TypeFilter::Listed(ids) = &viewpoint.allowed_relationships {
                for type_id in ids {
                    if !relationship_type_ids.contains(type_id.as_str()) {
                        violations.push(SchemaViolation::new(
                            format!("viewpoints[{index}].allowedRelationships"),
                            format!("relationship type `{type_id}` is not declared"),
                        ));
                    }
                }
            }
        }

        violations
    }

    /// Finds a declared element type by compound id.
    pub fn find_element_type(&self, type_id: &str) -> Option<&ElementTypeDefinition> {
        self.element_types.iter().find(|def| def.id == type_id)
    }

    /// Finds a declared relationship type by compound id.
    pub fn find_relationship_type(&self, type_id: &str) -> Option<&RelationshipTypeDefinition> {
        self.relationship_types.iter().find(|def| def.id == type_id)
    }

    /// Finds a declared layer by id.
    pub fn layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == layer_id)
    }

    fn check_owned_type_id(
        &self,
        violations: &mut Vec<SchemaViolation>,
        field: String,
        type_id: &str,
    ) {
        if !is_compound_type_id(type_id) {
            violations.push(SchemaViolation::new(
                field,
                format!("`{type_id}` is not in `notation:TypeName` format"),
            ));
        } else if notation_of(type_id) != Some(self.id.as_str()) {
            violations.push(SchemaViolation::new(
                field,
                format!("`{type_id}` does not carry this notation's prefix `{}`", self.id),
            ));
        }
    }
}

fn is_valid_notation_id(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
