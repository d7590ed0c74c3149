/// Case-insensitive equality for display names.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Remove every whitespace character (e.g., "Zankyou Sanka" -> "ZankyouSanka").
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Loose title comparison used when the exact title search failed.
///
/// Case-insensitive. Matches if either title contains the other, either as
/// written or with all whitespace removed. Empty titles never match.
pub fn loose_title_match(candidate: &str, wanted: &str) -> bool {
    let a = candidate.trim().to_lowercase();
    let b = wanted.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(&b) || b.contains(&a) {
        return true;
    }
    let a = strip_whitespace(&a);
    let b = strip_whitespace(&b);
    a.contains(&b) || b.contains(&a)
}

/// First half of `s`, counted in characters (floor of len/2).
pub fn first_half(s: &str) -> &str {
    let half = s.chars().count() / 2;
    match s.char_indices().nth(half) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
