//! Element domain model.
//!
//! # Responsibility
//! - Define the typed node record shared by every notation.
//! - Provide lifecycle helpers for timestamp maintenance.
//!
//! # Invariants
//! - `id` is stable and never reused for another element.
//! - `type_id` uses the compound `notation:TypeName` form and never changes
//!   after creation.
//! - `modified >= created` at all times; only `modified` moves on update.

use crate::ident;
use crate::model::property::PropertyMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A typed node in the model graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Stable identifier, `elem-<uuid>` when store-generated.
    pub id: String,
    /// Compound type id, e.g. `archimate:ApplicationComponent`.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Display name. Must be non-empty; uniqueness is not enforced.
    pub name: String,
    /// Free-text documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Custom scalar properties.
    pub properties: PropertyMap,
    /// Unordered categorization tags.
    pub tags: Vec<String>,
    /// Creation instant. Set once.
    pub created: DateTime<Utc>,
    /// Last-modification instant. Advances on every committed update.
    pub modified: DateTime<Utc>,
}

impl Element {
    /// Creates an element with a generated identifier and fresh timestamps.
    pub fn new(type_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ident::element_id(),
            type_id: type_id.into(),
            name: name.into(),
            documentation: None,
            properties: PropertyMap::new(),
            tags: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// Advances the modification timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Returns the notation prefix of this element's compound type, if any.
    pub fn notation(&self) -> Option<&str> {
        self.type_id.split_once(':').map(|(prefix, _)| prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn new_element_starts_with_equal_timestamps() {
        let element = Element::new("archimate:ApplicationComponent", "Billing");
        assert_eq!(element.created, element.modified);
        assert!(element.id.starts_with("elem-"));
    }

    #[test]
    fn touch_never_moves_modified_backwards() {
        let mut element = Element::new("archimate:BusinessProcess", "Invoicing");
        let before = element.modified;
        element.touch();
        assert!(element.modified >= before);
        assert!(element.created <= element.modified);
    }

    #[test]
    fn notation_is_the_compound_prefix() {
        let element = Element::new("archimate:DataObject", "Ledger");
        assert_eq!(element.notation(), Some("archimate"));
        let untyped = Element::new("plain", "no prefix");
        assert_eq!(untyped.notation(), None);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let element = Element::new("archimate:Node", "Host");
        let json = serde_json::to_value(&element).expect("element should serialize");
        assert!(json.get("type").is_some());
        assert!(json.get("type_id").is_none());
        assert!(json.get("tags").is_some());
    }
}
