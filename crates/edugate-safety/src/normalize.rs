//! Identifier normalization for person arguments
//!
//! Agents often pass a display name ("Jane Doe") where the API expects an
//! account name ("jane.doe"). This is a convenience, never a validation:
//! whatever comes out is substituted, and nothing here can fail.

use serde_json::Value;

/// Derive `first.last` from a free-text name
///
/// Returns `None` when the input does not look like a free-text name
/// (no space, or already contains a dot). The first and last words are
/// lowercased, joined with a dot, and stripped of anything outside `[a-z.]`.
pub fn normalize_identifier(raw: &str) -> Option<String> {
    if !raw.contains(' ') || raw.contains('.') {
        return None;
    }

    let words: Vec<&str> = raw.split_whitespace().collect();
    let first = words.first().copied().unwrap_or_default();
    let last = if words.len() > 1 {
        words.last().copied().unwrap_or_default()
    } else {
        ""
    };

    let normalized: String = format!("{}.{}", first, last)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '.')
        .collect();

    Some(normalized)
}

/// Normalize the identity argument of `params` in place
///
/// Returns `(original, normalized)` when a substitution was made.
pub fn normalize_params(params: &mut Value, identity_param: Option<&str>) -> Option<(String, String)> {
    let key = identity_param?;
    let slot = params.get_mut(key)?;
    let original = slot.as_str()?.to_string();
    let normalized = normalize_identifier(&original)?;

    *slot = Value::String(normalized.clone());
    Some((original, normalized))
}
