//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify core crate wiring.
//! - Keep output deterministic for quick local sanity checks.

use strata_core::MetamodelRegistry;

fn main() {
    println!("strata_core ping={}", strata_core::ping());
    println!("strata_core version={}", strata_core::core_version());

    let mut registry = MetamodelRegistry::new();
    strata_archimate::register_into(&mut registry);
    if let Some(archimate) = registry.get(strata_archimate::NOTATION_ID) {
        println!(
            "notation id={} element_types={} relationship_types={} viewpoints={}",
            archimate.id,
            archimate.element_types.len(),
            archimate.relationship_types.len(),
            archimate.viewpoints.len()
        );
    }
}
