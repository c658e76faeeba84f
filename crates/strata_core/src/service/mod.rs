//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Own the wiring between the element store, the relationship store and
//!   the active metamodel.

pub mod model_service;
