// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod answer;
pub mod document;
pub mod upload;

pub use answer::{Answer, NO_RELEVANT_FILE, Response, SummarySection, render_summaries};
pub use document::StoredDocument;
pub use upload::{FileOutcome, UploadReport, UploadedFile};
