//! Title keyword extraction.
//!
//! Produces the derived keyword list stored alongside each document: the
//! lowercased title split on whitespace, with short tokens and boilerplate
//! legal stop-words removed, capped at ten keywords in original order.

/// Tokens dropped regardless of position.
const STOP_WORDS: [&str; 8] = [
    "ve",
    "ile",
    "hakkında",
    "dair",
    "kanunu",
    "kanun",
    "yönetmelik",
    "tebliğ",
];

/// Maximum number of keywords kept per title.
const MAX_KEYWORDS: usize = 10;

/// Extract up to [`MAX_KEYWORDS`] keywords from a title.
///
/// Tokens of two characters or fewer and exact stop-word matches are
/// dropped; survivors keep their original order. An empty title yields an
/// empty list.
pub fn extract_keywords(title: &str) -> Vec<String> {
    let lower = title.to_lowercase();

    lower
        .split_whitespace()
        .filter(|word| word.chars().count() > 2 && !STOP_WORDS.contains(word))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}
