//! Static flavor-name to flavor-id lookup.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Fallback flavor when the requested name is unknown.
pub const DEFAULT_FLAVOR_ID: &str = "general1-2";

static FLAVOR_IDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Standard Instances
        ("512MB Standard Instance", "2"),
        ("1GB Standard Instance", "3"),
        ("2GB Standard Instance", "4"),
        ("4GB Standard Instance", "5"),
        ("8GB Standard Instance", "6"),
        ("15GB Standard Instance", "7"),
        ("30GB Standard Instance", "8"),
        // Compute v1
        ("15 GB Compute v1", "compute1-15"),
        ("30 GB Compute v1", "compute1-30"),
        ("3.75 GB Compute v1", "compute1-4"),
        ("60 GB Compute v1", "compute1-60"),
        ("7.5 GB Compute v1", "compute1-8"),
        // General Purpose v1
        ("1 GB General Purpose v1", "general1-1"),
        ("2 GB General Purpose v1", "general1-2"),
        ("4 GB General Purpose v1", "general1-4"),
        ("8 GB General Purpose v1", "general1-8"),
        // I/O v1
        ("120 GB I/O v1", "io1-120"),
        ("15 GB I/O v1", "io1-15"),
        ("30 GB I/O v1", "io1-30"),
        ("60 GB I/O v1", "io1-60"),
        ("90 GB I/O v1", "io1-90"),
        // Memory v1
        ("120 GB Memory v1", "memory1-120"),
        ("15 GB Memory v1", "memory1-15"),
        ("240 GB Memory v1", "memory1-240"),
        ("30 GB Memory v1", "memory1-30"),
        ("60 GB Memory v1", "memory1-60"),
        // OnMetal
        ("OnMetal Compute v1", "onmetal-compute1"),
        ("OnMetal General Purpose v2 Large", "onmetal-general2-large"),
        ("OnMetal General Purpose v2 Medium", "onmetal-general2-medium"),
        ("OnMetal General Purpose v2 Small", "onmetal-general2-small"),
        ("OnMetal IO v1", "onmetal-io1"),
        ("OnMetal I/O v2", "onmetal-io2"),
        ("OnMetal Memory v1", "onmetal-memory1"),
        // Performance
        ("1 GB Performance", "performance1-1"),
        ("2 GB Performance", "performance1-2"),
        ("4 GB Performance", "performance1-4"),
        ("8 GB Performance", "performance1-8"),
        ("120 GB Performance", "performance2-120"),
        ("15 GB Performance", "performance2-15"),
        ("30 GB Performance", "performance2-30"),
        ("60 GB Performance", "performance2-60"),
        ("90 GB Performance", "performance2-90"),
    ])
});

/// Flavor id for a friendly flavor name, falling back to
/// [`DEFAULT_FLAVOR_ID`] for unknown names.
pub fn resolve_flavor_id(name: &str) -> &'static str {
    FLAVOR_IDS.get(name).copied().unwrap_or(DEFAULT_FLAVOR_ID)
}

/// Flavor family prefix stored in server metadata, e.g. "general1-2" →
/// "general". Works for OSPC flavor naming.
pub fn flavor_family(flavor_id: &str) -> String {
    let head = flavor_id.split('-').next().unwrap_or(flavor_id);
    let mut family = head.to_string();
    family.pop();
    family
}
