//! Case-insensitive substring search shared by the list screens.

/// Returns true when `query` appears in any of `fields`, ignoring case.
///
/// An empty query matches everything. Whitespace is matched literally.
#[must_use]
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
