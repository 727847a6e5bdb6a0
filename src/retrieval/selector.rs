// file: src/retrieval/selector.rs
// description: keyword scoring and single best-match document selection

use super::keywords::extract_keywords;
use crate::store::Documents;
use tracing::debug;

/// Number of `keywords` (duplicates included) found as substrings of `text_lower`.
///
/// Plain substring matching: "cat" hits inside "category".
pub fn score_document(keywords: &[String], text_lower: &str) -> usize {
    keywords
        .iter()
        .filter(|keyword| text_lower.contains(keyword.as_str()))
        .count()
}

/// Every document's score against `keywords`, in store order.
pub fn rank_documents(keywords: &[String], documents: &Documents) -> Vec<(String, usize)> {
    documents
        .iter()
        .map(|(id, doc)| (id.clone(), score_document(keywords, doc.text_lower())))
        .collect()
}

/// Id of the highest scoring document, or `None` when nothing scores above zero.
///
/// Ties go to the document inserted first.
pub fn find_most_relevant(query: &str, documents: &Documents) -> Option<String> {
    let keywords = extract_keywords(query);
    debug!("Keywords for query: {:?}", keywords);

    let mut best_match = None;
    let mut highest_score = 0;

    for (id, doc) in documents {
        let score = score_document(&keywords, doc.text_lower());
        debug!("Score for {}: {}", id, score);

        if score > highest_score {
            highest_score = score;
            best_match = Some(id.clone());
        }
    }

    best_match
}
