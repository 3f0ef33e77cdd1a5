//! Static OS image-name to image-UUID lookup.
//!
//! Temporary seed data; to be replaced with live `/images` calls.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static UBUNTU_IMAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "ubuntu 24.04 lts (cloud)",
            "2fd07c5d-3104-4931-882b-4fe6a115c3bd",
        ),
        (
            "ubuntu 22.04 lts (jammy jellyfish) (cloud)",
            "c2e5b7be-32ea-4f74-bb88-1c9a4104f8ca",
        ),
        (
            "ubuntu 20.04 lts (focal fossa) (cloud)",
            "f0927f2c-7b84-4bc9-ac8c-a0891ffb16d4",
        ),
    ])
});

/// Image UUID for a friendly image name (case-insensitive). Unknown names
/// pass through unchanged, assuming the caller already supplied a UUID.
pub fn resolve_image_uuid(name: &str) -> String {
    let key = name.trim().to_lowercase();
    UBUNTU_IMAGES
        .get(key.as_str())
        .map(|uuid| (*uuid).to_string())
        .unwrap_or_else(|| name.to_string())
}
