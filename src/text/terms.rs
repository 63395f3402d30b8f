//! Frequency-ranked topic term extraction.
//!
//! Pure and deterministic: identical input always yields the identical
//! ordered result.

use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::text::markup::strip_markup;

/// Common English function words excluded from topic extraction.
const STOPWORDS: [&str; 99] = [
    "the", "and", "to", "of", "a", "in", "is", "it", "you", "that", "was", "for", "on", "are",
    "with", "as", "i", "his", "they", "at", "be", "this", "have", "from", "or", "one", "had",
    "by", "word", "but", "not", "what", "all", "were", "we", "when", "your", "can", "said",
    "there", "use", "an", "each", "which", "she", "do", "how", "their", "if", "will", "up",
    "other", "about", "out", "many", "then", "them", "these", "so", "some", "her", "would",
    "make", "like", "him", "into", "time", "has", "look", "two", "more", "write", "go", "see",
    "number", "no", "way", "could", "people", "my", "than", "first", "water", "been", "call",
    "who", "oil", "its", "now", "find", "long", "down", "day", "did", "get", "come", "made",
    "may", "part",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.into_iter().collect())
}

fn word_token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z]+(?:['\-][A-Za-z]+)*").unwrap())
}

/// Check whether a token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    stopwords().contains(token)
}

/// Extract frequency-ranked topic terms from (possibly marked-up) text.
///
/// Markup is stripped, tokens are lowercased, stopwords and tokens
/// shorter than `min_length` are dropped, and only tokens occurring at
/// least `min_occurrences` times survive. Terms are ordered by
/// descending frequency; ties keep first-occurrence order.
pub fn extract_topics(text: &str, min_occurrences: usize, min_length: usize) -> Vec<(String, usize)> {
    let plain = strip_markup(text);

    // IndexMap keeps first-occurrence order for the stable tie-break.
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for m in word_token_pattern().find_iter(&plain) {
        let token = m.as_str().to_lowercase();
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut terms: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(token, count)| {
            *count >= min_occurrences
                && token.chars().count() >= min_length
                && !is_stopword(token)
        })
        .collect();

    terms.sort_by(|a, b| b.1.cmp(&a.1));
    terms
}
