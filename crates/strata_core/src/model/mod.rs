//! Domain model for the metamodel-constrained graph.
//!
//! # Responsibility
//! - Define the canonical element/relationship/view records.
//! - Keep every shape serializable to a plain JSON tree (no cycles;
//!   relationships and views reference elements by id).
//!
//! # Invariants
//! - Entity identifiers are stable strings assigned at creation.
//! - Custom properties are restricted to the scalar union in `property`.

pub mod element;
pub mod property;
pub mod relationship;
pub mod view;
