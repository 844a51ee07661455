//! Small string helpers shared by the extractors.

/// Byte offsets where `needle` occurs in `haystack` without an ASCII letter
/// immediately before or after it.
pub(crate) fn token_positions<'a>(
    haystack: &'a str,
    needle: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    haystack
        .match_indices(needle)
        .filter(move |(start, _)| {
            let end = start + needle.len();
            let before = haystack[..*start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(|c| c.is_ascii_alphabetic())
                && !after.is_some_and(|c| c.is_ascii_alphabetic())
        })
        .map(|(start, _)| start)
}

pub(crate) fn contains_token(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && token_positions(haystack, needle).next().is_some()
}

/// `text` with every occurrence of `needle` removed; unchanged if `needle`
/// is empty.
pub(crate) fn remove_all(text: &str, needle: &str) -> String {
    if needle.is_empty() {
        text.to_string()
    } else {
        text.replace(needle, "")
    }
}
