//! Notation metamodel definitions and the registry that manages them.
//!
//! A metamodel is the machine-readable definition of a notation: its layers,
//! element and relationship types, legal connections and viewpoints.
//! Definitions are registered once and treated as read-only afterwards.

pub mod definition;
pub mod registry;
