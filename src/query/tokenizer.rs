use std::collections::HashSet;

/// Substrings removed before splitting. Plain, case-sensitive replacement:
/// "ANDROID" loses its "AND", while a lower-case "and" survives as a term.
const STRIPPED: &[&str] = &["AND", "OR", "NOT", "(", ")"];

/// Extracts the plain search terms sent to the term-based catalog.
///
/// Tokens are split on single spaces, must be longer than two characters, and are
/// deduplicated case-insensitively with the first occurrence kept in place.
pub fn extract_search_terms(query: &str) -> Vec<String> {
    let cleaned = STRIPPED
        .iter()
        .fold(query.to_string(), |text, token| text.replace(token, " "));

    let mut seen = HashSet::new();
    cleaned
        .split(' ')
        .filter(|word| !word.is_empty())
        .filter(|word| word.chars().count() > 2)
        .filter(|word| seen.insert(word.to_lowercase()))
        .map(str::to_string)
        .collect()
}
