//! Identifier generation for model entities.
//!
//! # Responsibility
//! - Produce process-unique identifiers for elements, relationships and views.
//! - Keep the prefix vocabulary in one place.
//!
//! # Invariants
//! - Generated identifiers never collide within a process lifetime
//!   (128-bit random UUID body).
//! - A prefixed identifier is `<prefix>-<uuid>`; without a prefix it is the
//!   bare UUID string.

use uuid::Uuid;

/// Identifier prefix for elements.
pub const ELEMENT_ID_PREFIX: &str = "elem";
/// Identifier prefix for relationships.
pub const RELATIONSHIP_ID_PREFIX: &str = "rel";
/// Identifier prefix for views.
pub const VIEW_ID_PREFIX: &str = "view";

/// Generates a unique identifier, optionally tagged with a short prefix.
pub fn generate_id(prefix: Option<&str>) -> String {
    let uuid = Uuid::new_v4();
    match prefix {
        Some(tag) => format!("{tag}-{uuid}"),
        None => uuid.to_string(),
    }
}

/// Generates an element identifier (`elem-<uuid>`).
pub fn element_id() -> String {
    generate_id(Some(ELEMENT_ID_PREFIX))
}

/// Generates a relationship identifier (`rel-<uuid>`).
pub fn relationship_id() -> String {
    generate_id(Some(RELATIONSHIP_ID_PREFIX))
}

/// Generates a view identifier (`view-<uuid>`).
pub fn view_id() -> String {
    generate_id(Some(VIEW_ID_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::{element_id, generate_id, relationship_id};
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn prefixed_id_carries_prefix_and_valid_uuid_body() {
        let id = generate_id(Some("elem"));
        let body = id
            .strip_prefix("elem-")
            .expect("prefixed id should start with `elem-`");
        assert!(Uuid::parse_str(body).is_ok());
    }

    #[test]
    fn unprefixed_id_is_bare_uuid() {
        let id = generate_id(None);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn generated_ids_do_not_collide() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(element_id()), "element ids should be unique");
        }
    }

    #[test]
    fn entity_family_helpers_use_distinct_prefixes() {
        assert!(element_id().starts_with("elem-"));
        assert!(relationship_id().starts_with("rel-"));
    }
}
