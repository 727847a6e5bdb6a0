// file: src/models/document.rs
// description: parsed document held by the in-memory store
// reference: internal data structures

use chrono::{DateTime, Utc};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub text: String,
    text_lower: String,
    pub parsed_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Builds a document keyed by the lower-cased form of `name`.
    pub fn new(name: &str, text: String) -> Self {
        let text_lower = text.to_lowercase();

        Self {
            id: Self::normalize_id(name),
            text,
            text_lower,
            parsed_at: Utc::now(),
        }
    }

    /// Store key for an uploaded file: its base name, lower-cased.
    pub fn normalize_id(name: &str) -> String {
        Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| name.to_string())
            .to_lowercase()
    }

    pub fn text_lower(&self) -> &str {
        &self.text_lower
    }

    pub fn size(&self) -> usize {
        self.text.len()
    }
}
