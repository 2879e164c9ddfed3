//! Query normalization and exact-match key derivation

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Anything that is not a word character, whitespace, hyphen or parenthesis.
/// Hyphens and parentheses survive because legal citations use them, e.g.
/// "section 45(1)" or "cap 226-a".
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s\-()]").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static FILLER_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:please|kindly)\b").unwrap());

/// Question phrasings folded onto one canonical form, applied in order
static CANONICAL_PHRASES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"\bwhat are\b").unwrap(), "what is"),
        (Regex::new(r"\bhow do i\b").unwrap(), "how to"),
    ]
});

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Canonicalize a raw query so paraphrases share an exact-match key.
///
/// Idempotent: `normalize_query(&normalize_query(q)) == normalize_query(q)`.
pub fn normalize_query(query: &str) -> String {
    let lowered = query.trim().to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    let collapsed = collapse_whitespace(&stripped);
    let without_fillers = collapse_whitespace(&FILLER_WORDS.replace_all(&collapsed, ""));

    let mut canonical = without_fillers;
    for (pattern, replacement) in CANONICAL_PHRASES.iter() {
        canonical = pattern.replace_all(&canonical, *replacement).into_owned();
    }

    collapse_whitespace(&canonical)
}

/// Exact-match key for an already normalized query (hex SHA-256)
pub fn cache_key(normalized_query: &str) -> String {
    hex::encode(Sha256::digest(normalized_query.as_bytes()))
}
