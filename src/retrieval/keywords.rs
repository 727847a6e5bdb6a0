// file: src/retrieval/keywords.rs
// description: query normalization into significant lower-cased terms
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref WORD: Regex = Regex::new(r"\w+").expect("WORD regex is valid");
}

pub const STOPWORDS: [&str; 11] = [
    "what", "is", "the", "of", "a", "an", "in", "on", "at", "by", "for",
];

pub fn is_stopword(term: &str) -> bool {
    STOPWORDS.contains(&term)
}

/// Lower-cases `query` and returns its word tokens minus stopwords.
///
/// Duplicates are kept and order of appearance is preserved.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();

    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !is_stopword(term))
        .map(str::to_string)
        .collect()
}
