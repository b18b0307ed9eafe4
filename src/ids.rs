//! Random identifiers: registry ids, custom slugs, and instance ids.

#[cfg(test)]
#[path = "ids_test.rs"]
mod tests;

use rand::Rng;

/// URL-safe alphabet used for generated ids.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of a generated registry id.
pub const REGISTRY_ID_LEN: usize = 10;

/// Length of a generated arranged-flower instance id.
pub const INSTANCE_ID_LEN: usize = 9;

/// Longest custom slug accepted by the registry.
pub const MAX_SLUG_LEN: usize = 64;

fn random_string(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..ID_ALPHABET.len());
            ID_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a short collision-resistant registry id.
#[must_use]
pub fn generate_id() -> String {
    random_string(REGISTRY_ID_LEN)
}

/// Generate a fresh instance id for a placed flower.
#[must_use]
pub fn generate_instance_id() -> String {
    random_string(INSTANCE_ID_LEN)
}

/// Normalize a creator-chosen slug. Returns `None` when it is empty, too
/// long, or contains characters outside the URL-safe id alphabet.
#[must_use]
pub fn normalize_slug(raw: &str) -> Option<String> {
    let slug = raw.trim();
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return None;
    }
    if !slug.bytes().all(|b| ID_ALPHABET.contains(&b)) {
        return None;
    }
    Some(slug.to_owned())
}
