//! Scalar property bags attached to model entities.
//!
//! # Responsibility
//! - Define the tagged scalar union allowed in custom property maps.
//! - Keep property serialization as a plain JSON scalar per value.
//!
//! # Invariants
//! - A property value is exactly one of: text, number, flag.
//! - Property maps are sorted by key for deterministic export order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Custom properties keyed by name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// One scalar property value.
///
/// Serialized untagged, so JSON scalars map directly:
/// `"text"` / `1.5` / `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Flag(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}
