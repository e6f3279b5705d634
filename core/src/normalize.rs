//! Ingredient key normalization.
//!
//! Pantry keys are compared case-insensitively, so every key is trimmed and
//! lower-cased before it reaches storage.

/// Normalizes a single ingredient key.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits a comma-separated ingredient list into normalized keys.
///
/// Order is preserved and duplicates are kept; empty segments are dropped.
///
/// ```
/// use pantry_core::normalize_ingredients;
///
/// let keys = normalize_ingredients("2 ovos, Sal , queijo ralado,,");
/// assert_eq!(keys, ["2 ovos", "sal", "queijo ralado"]);
/// ```
pub fn normalize_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_key)
        .filter(|key| !key.is_empty())
        .collect()
}
