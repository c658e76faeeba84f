//! Relationship domain model.
//!
//! # Responsibility
//! - Define the typed, directed edge record between two elements.
//! - Define the access-qualifier vocabulary for access-style relationship
//!   types.
//!
//! # Invariants
//! - `type_id`, `source_id` and `target_id` are fixed at creation; updates
//!   may only change name, documentation, properties and qualifiers.
//! - Endpoints reference elements by id, never by embedding.

use crate::ident;
use crate::model::property::PropertyMap;
use serde::{Deserialize, Serialize};

/// Access-qualifier for access-style relationship types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessQualifier {
    Read,
    Write,
    ReadWrite,
    Access,
}

/// A typed, directed edge between two elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Stable identifier, `rel-<uuid>` when store-generated.
    pub id: String,
    /// Compound type id, e.g. `archimate:Serving`.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Source element id.
    pub source_id: String,
    /// Target element id.
    pub target_id: String,
    /// Optional edge label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Custom scalar properties.
    pub properties: PropertyMap,
    /// Meaningful only for access-style relationship types.
    #[serde(rename = "accessType", skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessQualifier>,
    /// Meaningful only for influence-style relationship types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influence_strength: Option<String>,
}

impl Relationship {
    /// Creates a relationship with a generated identifier.
    pub fn new(
        type_id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        Self {
            id: ident::relationship_id(),
            type_id: type_id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            name: None,
            documentation: None,
            properties: PropertyMap::new(),
            access: None,
            influence_strength: None,
        }
    }

    /// Returns whether the given element id is either endpoint.
    pub fn touches(&self, element_id: &str) -> bool {
        self.source_id == element_id || self.target_id == element_id
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessQualifier, Relationship};

    #[test]
    fn access_qualifier_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&AccessQualifier::ReadWrite)
            .expect("qualifier should serialize");
        assert_eq!(json, r#""readwrite""#);
        let parsed: AccessQualifier =
            serde_json::from_str(r#""access""#).expect("qualifier should parse");
        assert_eq!(parsed, AccessQualifier::Access);
    }

    #[test]
    fn touches_matches_either_endpoint() {
        let rel = Relationship::new("archimate:Flow", "elem-a", "elem-b");
        assert!(rel.touches("elem-a"));
        assert!(rel.touches("elem-b"));
        assert!(!rel.touches("elem-c"));
    }

    #[test]
    fn endpoint_ids_serialize_in_camel_case() {
        let rel = Relationship::new("archimate:Serving", "elem-a", "elem-b");
        let json = serde_json::to_value(&rel).expect("relationship should serialize");
        assert_eq!(json["sourceId"], "elem-a");
        assert_eq!(json["targetId"], "elem-b");
        assert!(json.get("accessType").is_none());
    }
}
