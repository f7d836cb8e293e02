/// Trimmed and lower-cased search term, `None` if blank.
pub fn normalize_search_term(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_lowercase())
}

/// Substring match of an already lower-cased needle.
pub fn contains_lowercase(haystack: &str, needle_lowercase: &str) -> bool {
    haystack.to_lowercase().contains(needle_lowercase)
}
