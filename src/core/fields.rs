//! Header normalization
//!
//! Column headers are free-form labels ("Functional Owner of Deliverable",
//! "Help Needed?"). Lookups and record keys use a stable camelCase form
//! derived here.

/// Normalize a raw column header into a camelCase field key.
///
/// Strips everything that is not alphanumeric or whitespace, splits on
/// whitespace runs, lowercases the first token and capitalizes the rest.
/// Empty or punctuation-only headers normalize to the empty string.
pub fn field_key(header: &str) -> String {
    let cleaned: String = header
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut key = String::with_capacity(cleaned.len());
    for (i, token) in cleaned.split_whitespace().enumerate() {
        if i == 0 {
            key.push_str(&token.to_lowercase());
        } else {
            let mut chars = token.chars();
            if let Some(first) = chars.next() {
                key.extend(first.to_uppercase());
                key.push_str(&chars.as_str().to_lowercase());
            }
        }
    }
    key
}
