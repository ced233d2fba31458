//! Name normalization applied before a validated write commits.

/// Trim and capitalize: first character uppercased, the rest lowercased.
///
/// Matches how reference-data names (countries, cities, seat classes) are
/// canonicalized on save, so "  wARSAW " and "warsaw" land as the same row.
pub fn capitalize(value: &str) -> String {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Trim and uppercase, for code-like fields (ISO codes, airport codes,
/// tail numbers).
pub fn uppercase(value: &str) -> String {
    value.trim().to_uppercase()
}
