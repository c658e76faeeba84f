//! Entity stores for the model graph.
//!
//! # Responsibility
//! - Own the in-memory element and relationship collections.
//! - Gate every mutation through shape validation, and relationship creation
//!   additionally through referential/metamodel checks.
//!
//! # Invariants
//! - A failing mutation leaves the store unchanged; the one documented
//!   exception is bulk import, which keeps the items loaded before the first
//!   invalid one.
//! - Query results are owned snapshots; mutating them never touches store
//!   state.

use crate::schema::SchemaViolation;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod element_repo;
pub mod relationship_repo;

use relationship_repo::ConnectionViolation;

pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation failure raised by either store.
///
/// Absence of an update/delete target is reported through sentinel returns
/// (`Ok(None)` / `false`), not through this error.
#[derive(Debug)]
pub enum StoreError {
    /// The candidate entity failed shape validation.
    Schema(Vec<SchemaViolation>),
    /// A relationship failed referential or metamodel checking.
    Rejected(Vec<ConnectionViolation>),
    /// Bulk import aborted at the given item; earlier items stay committed.
    BatchItem {
        index: usize,
        violations: Vec<SchemaViolation>,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(violations) => {
                write!(f, "validation failed: ")?;
                join(f, violations, "; ")
            }
            Self::Rejected(violations) => {
                write!(f, "invalid relationship: ")?;
                join(f, violations, ", ")
            }
            Self::BatchItem { index, violations } => {
                write!(f, "bulk load aborted at item {index}: ")?;
                join(f, violations, "; ")
            }
        }
    }
}

impl Error for StoreError {}

fn join<T: Display>(
    f: &mut Formatter<'_>,
    items: &[T],
    separator: &str,
) -> std::fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
