// file: src/retrieval/mod.rs
// description: keyword extraction, relevance selection and request routing
// reference: internal module structure

pub mod keywords;
pub mod router;
pub mod selector;

pub use keywords::{STOPWORDS, extract_keywords};
pub use router::{QueryKind, classify};
pub use selector::{find_most_relevant, rank_documents, score_document};
